use rand::RngCore;

/// Random RFC 4122 version 4 UUID drawn from `rng`.
pub fn random_uuid(rng: &mut dyn RngCore) -> String {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .to_string()
}
