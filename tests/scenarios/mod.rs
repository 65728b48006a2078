//! End-to-end scenarios through the public API.

mod tests_concurrency;
mod tests_extraction;
mod tests_persistence;
mod tests_queries;
