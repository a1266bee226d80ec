use roster_core::db::open_db_in_memory;
use roster_core::{
    Course, Member, MemoryStorage, RosterService, RosterServiceError, SqliteStorage, WriteOutcome,
};

#[test]
fn guarded_save_rejects_duplicate_username() {
    let storage = MemoryStorage::new();
    let mut roster = RosterService::open(&storage).unwrap();

    let ana = roster.save_member(Member::new("Ana", "ana1")).unwrap();
    assert_eq!(ana, 1);

    let err = roster
        .save_member(Member::new("Other Ana", "ana1"))
        .unwrap_err();
    assert!(matches!(err, RosterServiceError::UsernameTaken(ref name) if name == "ana1"));
    assert_eq!(err.to_string(), "Username already exists!");
    assert_eq!(roster.list_members().len(), 1);
    assert!(roster.username_exists("ana1", None));
}

#[test]
fn unguarded_create_still_inserts_duplicate_username() {
    let storage = MemoryStorage::new();
    let mut roster = RosterService::open(&storage).unwrap();

    roster.create_member(Member::new("Ana", "ana1")).unwrap();
    let second = roster.create_member(Member::new("Ana", "ana1")).unwrap();

    assert_eq!(second, 2);
    assert_eq!(roster.list_members().len(), 2);
}

#[test]
fn save_member_updates_existing_record_under_its_own_username() {
    let storage = MemoryStorage::new();
    let mut roster = RosterService::open(&storage).unwrap();
    let id = roster.save_member(Member::new("Ana", "ana1")).unwrap();
    roster.save_member(Member::new("Bo", "bo")).unwrap();

    let mut edited = roster.get_member(id).unwrap().clone();
    edited.description = "front desk".to_string();
    assert_eq!(roster.save_member(edited).unwrap(), id);
    assert_eq!(roster.get_member(id).unwrap().description, "front desk");

    let mut stolen = roster.get_member(id).unwrap().clone();
    stolen.username = "bo".to_string();
    assert!(matches!(
        roster.save_member(stolen),
        Err(RosterServiceError::UsernameTaken(_))
    ));
    assert_eq!(roster.get_member(id).unwrap().username, "ana1");
}

#[test]
fn save_course_creates_then_updates() {
    let storage = MemoryStorage::new();
    let mut roster = RosterService::open(&storage).unwrap();

    let id = roster.save_course(Course::new("Yoga", "2024-01-10")).unwrap();
    let mut edited = roster.get_course(id).unwrap().clone();
    edited.start_date = "2024-01-17".to_string();
    assert_eq!(roster.save_course(edited).unwrap(), id);

    assert_eq!(roster.list_courses().len(), 1);
    assert_eq!(roster.get_course(id).unwrap().start_date, "2024-01-17");
}

#[test]
fn lookups_resolve_enrollments_and_skip_dangling_ids() {
    let conn = open_db_in_memory().unwrap();
    let mut roster = RosterService::open(SqliteStorage::try_new(&conn).unwrap()).unwrap();
    let ana = roster.save_member(Member::new("Ana", "ana1")).unwrap();
    let bo = roster.save_member(Member::new("Bo", "bo")).unwrap();
    let yoga = roster.save_course(Course::new("Yoga", "2024-01-10")).unwrap();
    let spin = roster.save_course(Course::new("Spin", "2024-02-01")).unwrap();

    roster.enroll(ana, yoga).unwrap();
    roster.enroll(bo, yoga).unwrap();
    roster.enroll(ana, spin).unwrap();
    assert_eq!(roster.delete_member(bo).unwrap(), WriteOutcome::Applied);
    assert_eq!(roster.delete_course(spin).unwrap(), WriteOutcome::Applied);

    assert_eq!(roster.get_course(yoga).unwrap().participants, vec![ana, bo]);
    let participants: Vec<_> = roster
        .course_participants(yoga)
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(participants, vec![ana]);

    assert_eq!(roster.get_member(ana).unwrap().courses, vec![yoga, spin]);
    let courses: Vec<_> = roster.member_courses(ana).iter().map(|c| c.id).collect();
    assert_eq!(courses, vec![yoga]);

    assert!(roster.course_participants(99).is_empty());
    assert!(roster.member_courses(99).is_empty());
}

#[test]
fn service_state_reloads_from_shared_storage() {
    let storage = MemoryStorage::new();
    {
        let mut roster = RosterService::open(&storage).unwrap();
        let ana = roster.save_member(Member::new("Ana", "ana1")).unwrap();
        let yoga = roster.save_course(Course::new("Yoga", "2024-01-10")).unwrap();
        roster.enroll(ana, yoga).unwrap();
    }

    let roster = RosterService::open(&storage).unwrap();
    assert_eq!(roster.get_member(1).unwrap().courses, vec![1]);
    assert_eq!(roster.get_course(1).unwrap().participants, vec![1]);
    assert_eq!(roster.member_store().list_members().len(), 1);
    assert_eq!(roster.course_store().list_courses().len(), 1);
}

#[test]
fn cascade_delete_through_service() {
    let storage = MemoryStorage::new();
    let mut roster = RosterService::open(&storage).unwrap();
    let ana = roster.save_member(Member::new("Ana", "ana1")).unwrap();
    let yoga = roster.save_course(Course::new("Yoga", "2024-01-10")).unwrap();
    roster.enroll(ana, yoga).unwrap();

    let outcome = roster.delete_course_cascade(yoga).unwrap();

    assert_eq!(outcome.deleted, WriteOutcome::Applied);
    assert_eq!(outcome.references_removed, 1);
    assert!(roster.get_member(ana).unwrap().courses.is_empty());

    let missing = roster.delete_member_cascade(42).unwrap();
    assert_eq!(missing.deleted, WriteOutcome::NotFound);
    assert_eq!(missing.references_removed, 0);
}
