use sqlx::{postgres::PgPoolOptions, PgPool};
use std::env;
use uuid::Uuid;

use chamby::jobs::model::JobStatus;
use chamby::pricing::{cancellation_breakdown, format_cents, VISIT_BASE_FEE_CENTS};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "chambyctl <command>\n\
             Commands:\n\
             - reset\n\
             - seed <n>\n\
             - demo\n\
             - summary <job_id>\n\
             \n\
             Uses CHAMBY_DATABASE_URL or DATABASE_URL.\n"
        );
        std::process::exit(2);
    }

    let url = env::var("CHAMBY_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .expect("CHAMBY_DATABASE_URL or DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;

    match args[1].as_str() {
        "reset" => reset(&pool).await?,
        "seed" => {
            let n: i64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10);
            seed(&pool, n).await?;
        }
        "demo" => {
            reset(&pool).await?;
            seed(&pool, 5).await?;
            show_counts(&pool).await?;
        }
        "summary" => {
            let id = args.get(2).expect("usage: chambyctl summary <job_id>");
            let job_id: Uuid = id.parse()?;
            print_summary(&pool, job_id).await?;
        }
        other => {
            eprintln!("Unknown command: {other}");
            std::process::exit(2);
        }
    }

    Ok(())
}

async fn reset(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        TRUNCATE TABLE
            user_credits,
            jobs
        RESTART IDENTITY CASCADE
        "#,
    )
    .execute(pool)
    .await?;

    println!("reset OK");
    Ok(())
}

async fn seed(pool: &PgPool, n: i64) -> anyhow::Result<()> {
    let categories = ["plumbing", "electrical", "auto", "cleaning"];

    for i in 0..n {
        let category = categories[(i as usize) % categories.len()];
        let status = if i % 2 == 0 { "searching" } else { "on_site" };

        let job_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO jobs (client_id, category, status, visit_fee_cents)
            VALUES (gen_random_uuid(), $1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(category)
        .bind(status)
        .bind(VISIT_BASE_FEE_CENTS)
        .fetch_one(pool)
        .await?;

        println!("+ inserted job {category} status={status} id={job_id}");
    }
    Ok(())
}

async fn show_counts(pool: &PgPool) -> anyhow::Result<()> {
    let searching: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE status='searching'")
        .fetch_one(pool)
        .await?;
    let on_site: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE status='on_site'")
        .fetch_one(pool)
        .await?;
    let cancelled: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE status='cancelled'")
        .fetch_one(pool)
        .await?;

    println!("jobs: searching={searching} on_site={on_site} cancelled={cancelled}");
    Ok(())
}

async fn print_summary(pool: &PgPool, job_id: Uuid) -> anyhow::Result<()> {
    let row: Option<(String, i64)> =
        sqlx::query_as("SELECT status, visit_fee_cents FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(pool)
            .await?;

    let Some((status_str, visit_fee_cents)) = row else {
        eprintln!("job {job_id} not found");
        std::process::exit(1);
    };

    let status = JobStatus::parse(&status_str)
        .ok_or_else(|| anyhow::anyhow!("unrecognized status {status_str:?}"))?;
    let b = cancellation_breakdown(status, visit_fee_cents);

    println!("=== CANCELLATION SUMMARY for {job_id} ===");
    println!("status:            {status_str}");
    println!("phase:             {:?}", b.phase);
    println!("visit fee:         {}", format_cents(b.visit_fee_cents));
    println!("platform retains:  {}", format_cents(b.platform_retention_cents));
    println!("compensation:      {}", format_cents(b.compensation_cents));
    println!("provider receives: {}", format_cents(b.provider_receives_cents));

    Ok(())
}
