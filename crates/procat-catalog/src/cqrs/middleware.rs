//! Marker traits separating writes from reads
//!
//! Commands change catalog state and run their repository writes inside a
//! transaction; queries never write. Handlers log commands at `info` and
//! queries at `debug`.

pub trait Command {
    /// Name used in log fields
    const NAME: &'static str;
}

pub trait Query {
    /// Name used in log fields
    const NAME: &'static str;
}
