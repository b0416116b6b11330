//! Property tests driving the public API only.

mod linked;
