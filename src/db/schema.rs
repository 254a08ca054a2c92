use sqlx::PgPool;

pub const CREATE_LEADS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS leads_tb (
    id               TEXT PRIMARY KEY,
    name             TEXT NOT NULL,
    contact          TEXT NOT NULL,
    company          TEXT,
    product_interest TEXT,
    stage            TEXT NOT NULL DEFAULT 'New',
    follow_up_date   TEXT,
    notes            TEXT,
    documents        TEXT[] NOT NULL DEFAULT '{}',
    created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders_tb (
    id            TEXT PRIMARY KEY,
    lead_id       TEXT NOT NULL,
    status        TEXT NOT NULL DEFAULT 'Order Received',
    dispatch_date TEXT,
    tracking_info TEXT,
    documents     TEXT[] NOT NULL DEFAULT '{}',
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_DOCUMENT_REFS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS document_refs_tb (
    owner_kind   TEXT NOT NULL,
    owner_id     TEXT NOT NULL,
    storage_path TEXT NOT NULL,
    filename     TEXT NOT NULL,
    content_type TEXT,
    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (owner_kind, owner_id, storage_path)
)
"#;

pub const CREATE_INDEXES: [&str; 4] = [
    "CREATE INDEX IF NOT EXISTS idx_leads_stage ON leads_tb (stage)",
    "CREATE INDEX IF NOT EXISTS idx_leads_follow_up_date ON leads_tb (follow_up_date)",
    "CREATE INDEX IF NOT EXISTS idx_orders_lead_id ON orders_tb (lead_id)",
    "CREATE INDEX IF NOT EXISTS idx_orders_status ON orders_tb (status)",
];

/// Idempotent schema bootstrap, run at startup
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Initializing PostgreSQL schema...");

    for ddl in [
        CREATE_LEADS_TABLE,
        CREATE_ORDERS_TABLE,
        CREATE_DOCUMENT_REFS_TABLE,
    ] {
        sqlx::query(ddl).execute(pool).await?;
    }
    for ddl in CREATE_INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }

    tracing::info!("PostgreSQL schema ready");
    Ok(())
}
