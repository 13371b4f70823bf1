use uuid::Uuid;

/// Produces identifiers for new products. Injected so tests can use counters.
pub type IdGenerator = Box<dyn Fn() -> String + Send + Sync>;

/// Random UUID v4, hyphenated.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn uuid_generator() -> IdGenerator {
    Box::new(new_id)
}
