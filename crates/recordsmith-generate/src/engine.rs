use std::sync::{Arc, Mutex, PoisonError};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::{Map, Value};
use tracing::{info, trace};

use crate::clock::{Clock, SystemClock};
use crate::errors::Result;
use crate::fields::{EvalContext, FieldSet};
use crate::keywords::KeywordRegistry;
use crate::model::GeneratorOptions;
use crate::parser::TemplateParser;

/// Evaluate one record from `fields`.
///
/// Non-reference fields are computed first; references then copy the value
/// their target produced in this same pass.
pub fn evaluate_record(fields: &FieldSet, ctx: &mut EvalContext<'_>) -> Map<String, Value> {
    let mut record = Map::new();
    for field in fields.iter() {
        if let Some(value) = field.evaluate(ctx) {
            record.insert(field.name().to_string(), value);
        }
    }

    let resolved: Vec<(String, Value)> = fields
        .references()
        .map(|(name, target)| {
            let value = record.get(target).cloned().unwrap_or(Value::Null);
            (name.to_string(), value)
        })
        .collect();
    record.extend(resolved);

    record
}

/// Parsed template plus the random and time sources used to evaluate it.
#[derive(Debug)]
pub struct Processor {
    fields: Arc<FieldSet>,
    rng: Mutex<ChaCha8Rng>,
    clock: Arc<dyn Clock>,
    seed: u64,
}

impl Processor {
    /// Build a processor with the default keywords and options.
    pub fn new(body: &[u8]) -> Result<Self> {
        Self::builder(body).build()
    }

    /// Build a processor whose keyword set is the defaults merged with
    /// `keywords`.
    pub fn with_keywords(body: &[u8], keywords: KeywordRegistry) -> Result<Self> {
        Self::builder(body).keywords(keywords).build()
    }

    pub fn builder(body: &[u8]) -> ProcessorBuilder<'_> {
        ProcessorBuilder {
            body,
            keywords: None,
            options: GeneratorOptions::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Shared handle to the parsed fields.
    pub fn shared_fields(&self) -> Arc<FieldSet> {
        Arc::clone(&self.fields)
    }

    /// Seed the internal RNG was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Evaluate one record and encode it as compact JSON.
    pub fn generate(&self) -> Vec<u8> {
        Value::Object(self.generate_value()).to_string().into_bytes()
    }

    /// Evaluate one record using the processor's own RNG.
    pub fn generate_value(&self) -> Map<String, Value> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.generate_with(&mut *rng)
    }

    /// Evaluate one record with a caller-supplied RNG.
    pub fn generate_with(&self, rng: &mut dyn RngCore) -> Map<String, Value> {
        let mut ctx = EvalContext {
            rng,
            clock: self.clock.as_ref(),
        };
        let record = evaluate_record(&self.fields, &mut ctx);
        trace!(fields = record.len(), "record generated");
        record
    }

    /// Lazily evaluate `count` records.
    pub fn records(&self, count: usize) -> Records<'_> {
        Records {
            processor: self,
            remaining: count,
        }
    }
}

/// Configures and builds a [`Processor`].
pub struct ProcessorBuilder<'a> {
    body: &'a [u8],
    keywords: Option<KeywordRegistry>,
    options: GeneratorOptions,
    clock: Arc<dyn Clock>,
}

impl ProcessorBuilder<'_> {
    /// Extra keyword bindings; they override defaults of the same name.
    pub fn keywords(mut self, keywords: KeywordRegistry) -> Self {
        self.keywords = Some(keywords);
        self
    }

    pub fn options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn build(self) -> Result<Processor> {
        let mut registry = KeywordRegistry::new(self.options.uuid_mode);
        if let Some(overrides) = self.keywords {
            registry.merge(overrides);
        }

        let parser = TemplateParser::new(&registry, self.options.marker_policy);
        let fields = parser.parse(self.body)?;
        let seed = self.options.seed.unwrap_or_else(time_seed);

        info!(
            fields = fields.len(),
            references = fields.references().count(),
            seed,
            "processor built"
        );

        Ok(Processor {
            fields: Arc::new(fields),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            clock: self.clock,
            seed,
        })
    }
}

fn time_seed() -> u64 {
    chrono::Utc::now().timestamp_micros() as u64
}

/// Iterator returned by [`Processor::records`].
pub struct Records<'a> {
    processor: &'a Processor,
    remaining: usize,
}

impl Iterator for Records<'_> {
    type Item = Map<String, Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.processor.generate_value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Records<'_> {}
