use roster_core::db::open_db_in_memory;
use roster_core::{Course, CourseStore, SqliteStorage, Storage, WriteOutcome, COURSES_NEXT_ID_KEY};

#[test]
fn create_update_delete_over_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let mut store = CourseStore::try_new(storage).unwrap();

    let yoga = store
        .create_course(Course::new("Yoga", "2024-01-10").with_description("mornings"))
        .unwrap();
    let spin = store.create_course(Course::new("Spin", "2024-02-01")).unwrap();
    assert_eq!((yoga, spin), (1, 2));

    let mut renamed = store.get_course(spin).unwrap().clone();
    renamed.name = "Spin Advanced".to_string();
    assert_eq!(
        store.update_course(spin, renamed).unwrap(),
        WriteOutcome::Applied
    );
    assert_eq!(store.delete_course(yoga).unwrap(), WriteOutcome::Applied);

    let reloaded = CourseStore::try_new(storage).unwrap();
    assert_eq!(reloaded.list_courses(), store.list_courses());
    assert_eq!(reloaded.list_courses().len(), 1);
    assert_eq!(reloaded.list_courses()[0].name, "Spin Advanced");
    assert_eq!(
        storage.get_item(COURSES_NEXT_ID_KEY).unwrap().as_deref(),
        Some("3")
    );
}

#[test]
fn missing_course_operations_are_no_ops() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let mut store = CourseStore::try_new(storage).unwrap();
    store.create_course(Course::new("Yoga", "2024-01-10")).unwrap();

    assert_eq!(
        store.update_course(8, Course::new("Ghost", "")).unwrap(),
        WriteOutcome::NotFound
    );
    assert_eq!(store.delete_course(8).unwrap(), WriteOutcome::NotFound);
    assert_eq!(
        store.enroll_participant(8, 1).unwrap(),
        WriteOutcome::NotFound
    );
    assert_eq!(store.list_courses().len(), 1);
}

#[test]
fn enroll_participant_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let mut store = CourseStore::try_new(storage).unwrap();
    let yoga = store.create_course(Course::new("Yoga", "2024-01-10")).unwrap();

    store.enroll_participant(yoga, 4).unwrap();
    let second = store.enroll_participant(yoga, 4).unwrap();

    assert_eq!(second, WriteOutcome::Unchanged);
    assert_eq!(store.get_course(yoga).unwrap().participants, vec![4]);
}

#[test]
fn course_and_member_ids_are_independent() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let mut members = roster_core::MemberStore::try_new(storage).unwrap();
    let mut courses = CourseStore::try_new(storage).unwrap();

    let member_id = members
        .create_member(roster_core::Member::new("Ana", "ana1"))
        .unwrap();
    let course_id = courses
        .create_course(Course::new("Yoga", "2024-01-10"))
        .unwrap();

    assert_eq!(member_id, 1);
    assert_eq!(course_id, 1);
}
