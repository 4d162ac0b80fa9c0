use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use recordsmith_core::PatternDescriptor;

pub const LETTER_POOL: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGIT_POOL: &[u8] = b"0123456789";
pub const SPECIAL_POOL: &[u8] = b"~!@#$%^&*()_+-={}[]";

/// Generate `prefix + body + suffix` for a descriptor.
///
/// The body holds exactly `letters` letters, `digits` digits and `specials`
/// specials, shuffled so that classes carry no positional meaning.
pub fn generate_pattern(descriptor: &PatternDescriptor, rng: &mut dyn RngCore) -> String {
    let mut body = Vec::with_capacity(descriptor.length());
    fill_from_pool(&mut body, LETTER_POOL, descriptor.letters(), rng);
    fill_from_pool(&mut body, DIGIT_POOL, descriptor.digits(), rng);
    fill_from_pool(&mut body, SPECIAL_POOL, descriptor.specials(), rng);
    body.shuffle(rng);

    let mut value = String::with_capacity(
        descriptor.prefix().len() + body.len() + descriptor.suffix().len(),
    );
    value.push_str(descriptor.prefix());
    value.extend(body.into_iter().map(char::from));
    value.push_str(descriptor.suffix());
    value
}

fn fill_from_pool(buf: &mut Vec<u8>, pool: &[u8], count: usize, rng: &mut dyn RngCore) {
    for _ in 0..count {
        buf.push(pool[rng.random_range(0..pool.len())]);
    }
}
