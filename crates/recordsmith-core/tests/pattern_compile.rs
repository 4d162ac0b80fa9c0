use recordsmith_core::{PATTERN_MAX_LEN, PatternDescriptor, PatternError, compile};

#[test]
fn compile_reads_prefix_body_and_suffix() {
    let descriptor = compile("some prefix <4/2/1> some suffix").expect("compile pattern");

    assert_eq!(descriptor.prefix(), "some prefix ");
    assert_eq!(descriptor.suffix(), " some suffix");
    assert_eq!(descriptor.letters(), 4);
    assert_eq!(descriptor.digits(), 2);
    assert_eq!(descriptor.specials(), 1);
    assert_eq!(descriptor.length(), 7);
}

#[test]
fn compile_unescapes_literal_brackets() {
    let descriptor = compile("I \\<3 U <4/2/1> 1 \\> 0").expect("compile pattern");

    assert_eq!(descriptor.prefix(), "I <3 U ");
    assert_eq!(descriptor.suffix(), " 1 > 0");

    let descriptor = compile("\\<0\\> <5>").expect("compile escaped prefix");
    assert_eq!(descriptor.prefix(), "<0> ");
    assert_eq!(descriptor.length(), 5);
}

#[test]
fn compile_length_always_matches_counts() {
    for letters in 0..=8 {
        for digits in 0..=8 {
            for specials in 0..=8 {
                let raw = format!("<{letters}/{digits}/{specials}>");
                let descriptor = compile(&raw).expect("compile pattern");
                assert_eq!(descriptor.length(), letters + digits + specials);
            }
        }
    }
}

#[test]
fn compile_accepts_exactly_max_length() {
    let descriptor = compile("<64>").expect("64 fits");
    assert_eq!(descriptor.length(), PATTERN_MAX_LEN);

    let descriptor = compile("<30/30/4>").expect("64 across segments fits");
    assert_eq!(descriptor.length(), PATTERN_MAX_LEN);
}

#[test]
fn compile_rejects_one_past_max_length() {
    assert_eq!(
        compile("<65>"),
        Err(PatternError::PatternTooLong {
            max: PATTERN_MAX_LEN,
            actual: 65
        })
    );
    assert!(matches!(
        compile("<34/32/1>"),
        Err(PatternError::PatternTooLong { actual: 67, .. })
    ));
}

#[test]
fn compile_requires_located_body() {
    for raw in ["<4/2/1", "4/2/1>", "", "no brackets", "<prefix><4/2/1>", "><4>"] {
        assert_eq!(
            compile(raw),
            Err(PatternError::PatternNotFound),
            "raw {raw:?} should not locate a body"
        );
    }
}

#[test]
fn compile_rejects_bad_bodies() {
    for raw in ["<4/2/>", "<4/2/c>", "<>", "<5/2/1/>"] {
        assert!(
            matches!(compile(raw), Err(PatternError::InvalidPatternBody(_))),
            "raw {raw:?} should have an invalid body"
        );
    }
}

#[test]
fn compile_is_deterministic() {
    let raw = "user_<5/1>@test.com";
    assert_eq!(compile(raw), compile(raw));

    let parsed: PatternDescriptor = raw.parse().expect("parse via FromStr");
    assert_eq!(parsed.to_string(), "user_<5/1/0>@test.com");
}

#[test]
fn display_compiles_back_to_same_descriptor() {
    let escaped = compile("\\<0\\> <5>").expect("compile pattern");
    assert_eq!(escaped.prefix(), "<0> ");
    assert_eq!(escaped.to_string(), "\\<0\\> <5/0/0>");

    for raw in [
        "\\<0\\> <5>",
        "I \\<3 U <4/2/1> 1 \\> 0",
        "a\\\\b<3>",
        "x<2/2>\\<y",
        "<1>tail\\",
    ] {
        let descriptor = compile(raw).expect("compile pattern");
        assert_eq!(
            descriptor.to_string().parse::<PatternDescriptor>(),
            Ok(descriptor),
            "{raw:?} did not survive display"
        );
    }

    let built = PatternDescriptor::new("", "x\\", 1, 0, 0).expect("within cap");
    assert_eq!(built.to_string().parse::<PatternDescriptor>(), Ok(built));
}

#[test]
fn descriptor_serializes_its_shape() {
    let descriptor = compile("id-<3/2>").expect("compile pattern");
    let value = serde_json::to_value(&descriptor).expect("serialize descriptor");

    assert_eq!(
        value,
        serde_json::json!({
            "prefix": "id-",
            "suffix": "",
            "letters": 3,
            "digits": 2,
            "specials": 0
        })
    );
}

#[test]
fn descriptor_new_enforces_cap() {
    assert!(PatternDescriptor::new("", "", 60, 4, 0).is_ok());
    assert!(matches!(
        PatternDescriptor::new("", "", 60, 4, 1),
        Err(PatternError::PatternTooLong { actual: 65, .. })
    ));
}
