use std::path::PathBuf;
use std::thread;
use userstore_core::db::{global_db, init_global_db, shutdown_global_db, DbError, DbTarget};
use userstore_core::{RepoError, RepoResult, SqliteUserRepository, User, UserRepository};

// The handle is process-wide, so the whole lifecycle lives in one test.
#[test]
fn global_db_lifecycle() {
    assert!(global_db().is_none());
    shutdown_global_db().unwrap();

    let first = init_global_db(&DbTarget::Memory).unwrap();
    let second = init_global_db(&DbTarget::Memory).unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(global_db().is_some_and(|handle| std::ptr::eq(handle, first)));

    let err = init_global_db(&DbTarget::File(PathBuf::from("/tmp/other.db"))).err();
    assert!(matches!(err, Some(DbError::AlreadyInitialized { .. })));

    let workers: Vec<_> = (0..4u64)
        .map(|n| {
            thread::spawn(move || {
                let handle = init_global_db(&DbTarget::Memory).unwrap();
                handle
                    .with_conn(|conn| -> RepoResult<u64> {
                        let mut user = User::new(format!("user{n}"), "u@example.com", n);
                        SqliteUserRepository::new(conn).create_user(&mut user)?;
                        Ok(user.id)
                    })
                    .unwrap()
            })
        })
        .collect();
    let mut ids: Vec<u64> = workers.into_iter().map(|w| w.join().unwrap()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    let loaded = first
        .with_conn(|conn| SqliteUserRepository::new(conn).get_user(3))
        .unwrap();
    assert_eq!(loaded.id, 3);

    shutdown_global_db().unwrap();
    shutdown_global_db().unwrap();
    assert!(!first.is_open());

    let err = first
        .with_conn(|conn| SqliteUserRepository::new(conn).get_user(1))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(DbError::Closed)));
    assert!(matches!(
        init_global_db(&DbTarget::Memory).err(),
        Some(DbError::Closed)
    ));
}
