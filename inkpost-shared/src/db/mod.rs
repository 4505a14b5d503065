/// Database utilities
///
/// - `pool`: PostgreSQL connection pool creation

pub mod pool;
