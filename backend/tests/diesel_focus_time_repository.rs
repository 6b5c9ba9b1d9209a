//! Integration tests for `DieselFocusTimeRepository` against embedded PostgreSQL.

#[path = "support/embedded_postgres.rs"]
mod embedded_postgres;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use habit_tracker::domain::ports::FocusTimeRepository;
use habit_tracker::domain::{Calendar, FocusTimeDraft, FocusTimeSession, UserId};
use habit_tracker::outbound::persistence::{DbPool, DieselFocusTimeRepository, PoolConfig};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

use embedded_postgres::{handle_cluster_setup_failure, provision_template_database, shared_cluster};

struct TestContext {
    runtime: Runtime,
    repository: DieselFocusTimeRepository,
    _database: TemporaryDatabase,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = provision_template_database(cluster)?;

    let config = PoolConfig::new(database.url()).with_max_size(2);
    let pool = runtime
        .block_on(async { DbPool::new(config) })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselFocusTimeRepository::new(pool),
        _database: database,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn at(d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn session(owner: UserId, time_from: DateTime<Utc>, minutes: i64) -> FocusTimeSession {
    let time_to = time_from + TimeDelta::minutes(minutes);
    FocusTimeSession::new(FocusTimeDraft {
        id: Uuid::new_v4(),
        user_id: owner,
        time_from,
        time_to,
        created_at: time_to,
        updated_at: time_to,
    })
    .expect("ordered interval")
}

#[rstest]
fn sessions_list_in_start_order_per_owner(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: sessions_list_in_start_order_per_owner skipped");
        return;
    };
    let repository = context.repository.clone();
    let owner = UserId::random();
    let late = session(owner, at(12, 15), 30);
    let early = session(owner, at(3, 9), 25);
    let instant = session(owner, at(5, 8), 0);
    let theirs = session(UserId::random(), at(4, 10), 45);

    let listed = context.runtime.block_on(async {
        for s in [&late, &early, &instant, &theirs] {
            repository.create(s).await.expect("create session");
        }
        repository.list_for_owner(&owner).await.expect("list")
    });

    assert_eq!(listed, vec![early, instant, late]);
}

#[rstest]
#[case(Calendar::utc())]
#[case(Calendar::with_offset_minutes(120).expect("valid offset"))]
#[case(Calendar::with_offset_minutes(-300).expect("valid offset"))]
fn month_window_includes_both_bounds(
    repo_context: Option<TestContext>,
    #[case] calendar: Calendar,
) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: month_window_includes_both_bounds skipped");
        return;
    };
    let repository = context.repository.clone();
    let owner = UserId::random();
    let window = calendar.month_window(at(15, 12)).expect("window");
    let one_ms = TimeDelta::milliseconds(1);

    let first = session(owner, window.start(), 10);
    let last = session(owner, window.end(), 10);
    let before = session(owner, window.start() - one_ms, 10);
    let after = session(owner, window.end() + one_ms, 10);
    let theirs = session(UserId::random(), at(15, 12), 10);

    let within = context.runtime.block_on(async {
        for s in [&after, &last, &before, &first, &theirs] {
            repository.create(s).await.expect("create session");
        }
        repository
            .list_started_within(&owner, &window)
            .await
            .expect("list within window")
    });

    assert_eq!(within, vec![first, last]);
}

#[rstest]
fn deletes_are_owner_scoped(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deletes_are_owner_scoped skipped");
        return;
    };
    let repository = context.repository.clone();
    let owner = UserId::random();
    let stored = session(owner, at(7, 9), 50);

    let (foreign, own, repeat, remaining) = context.runtime.block_on(async {
        repository.create(&stored).await.expect("create session");
        let foreign = repository
            .delete_for_owner(&UserId::random(), &stored.id())
            .await
            .expect("foreign delete");
        let own = repository
            .delete_for_owner(&owner, &stored.id())
            .await
            .expect("own delete");
        let repeat = repository
            .delete_for_owner(&owner, &stored.id())
            .await
            .expect("repeat delete");
        let remaining = repository.list_for_owner(&owner).await.expect("list");
        (foreign, own, repeat, remaining)
    });

    assert!(!foreign);
    assert!(own);
    assert!(!repeat);
    assert!(remaining.is_empty());
}
