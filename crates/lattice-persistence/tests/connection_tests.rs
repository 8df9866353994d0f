//! Pruebas básicas de configuración y pool (requiere DATABASE_URL válido en entorno).

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use lattice_core::{DispatchId, SummaryRepository};
use lattice_persistence::{config::DbConfig,
                          pg::{build_pool, build_pool_with_migrations, PgSummaryRepository, PoolProvider}};

#[test]
fn create_pool_from_env() {
    if std::env::var("DATABASE_URL").is_err() { eprintln!("DATABASE_URL no definido: omitiendo test"); return; }
    let cfg = DbConfig::from_env().expect("config");
    let pool = build_pool_with_migrations(&cfg.url, cfg.min_connections, cfg.max_connections).expect("pool");
    let mut conn = pool.get().expect("conn");
    conn.batch_execute("SELECT 1 FROM lattices LIMIT 1;").expect("lattices table exists after migrations");
}

#[test]
fn inverted_pool_sizes_are_clamped() {
    if std::env::var("DATABASE_URL").is_err() { eprintln!("skip (no DATABASE_URL)"); return; }
    let cfg = DbConfig::from_env().expect("config");
    let pool = build_pool(&cfg.url, 4, 1).expect("pool with min > max");
    assert_eq!(pool.max_size(), 1);
}

#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}

/// Base ajena: `lattices` ya existe (creada por el dispatcher) y no hay
/// tabla de migraciones de Diesel. El pool normal debe servir consultas sin
/// intentar crear nada.
#[test]
fn plain_pool_reads_foreign_schema_without_migrating() {
    if std::env::var("DATABASE_URL").is_err() { eprintln!("skip (no DATABASE_URL)"); return; }
    let cfg = DbConfig::from_env().expect("config");
    let schema = format!("lattice_ro_{}", uuid::Uuid::new_v4().simple());
    // `public.lattices` sirve de molde para la tabla "ajena".
    let admin = build_pool_with_migrations(&cfg.url, 1, 1).expect("admin pool");
    let mut conn = admin.get().expect("conn");
    conn.batch_execute(&format!("CREATE SCHEMA {schema};
         CREATE TABLE {schema}.lattices (LIKE public.lattices INCLUDING ALL);"))
        .expect("foreign schema");

    let sep = if cfg.url.contains('?') { '&' } else { '?' };
    let scoped_url = format!("{}{sep}options=-csearch_path%3D{schema}", cfg.url);
    let result = build_pool(&scoped_url, 1, 1).map(|pool| {
                                                  let repo = PgSummaryRepository::new(PoolProvider { pool });
                                                  repo.get_summary(DispatchId::new_v4())
                                              });

    let tracking: Count = diesel::sql_query("SELECT COUNT(*) AS count FROM information_schema.tables \
                                             WHERE table_schema = $1 AND table_name = '__diesel_schema_migrations'")
        .bind::<diesel::sql_types::Text, _>(&schema)
        .get_result(&mut conn)
        .expect("count");
    conn.batch_execute(&format!("DROP SCHEMA {schema} CASCADE;")).expect("cleanup");

    assert!(matches!(result, Ok(Ok(None))), "pool sobre esquema ajeno: {result:?}");
    assert_eq!(tracking.count, 0, "el pool normal no debe crear la tabla de migraciones");
}
