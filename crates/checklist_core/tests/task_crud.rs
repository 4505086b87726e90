use checklist_core::db::open_db_in_memory;
use checklist_core::{
    NewTask, Patch, RepoError, SqliteTaskRepository, TaskPatch, TaskRepository,
    TaskValidationError,
};
use std::collections::HashSet;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let created = repo.create_task(&NewTask::new("Task-1", "first")).unwrap();
    assert!(!created.status);

    let loaded = repo.get_task(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn create_honors_explicit_status() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let created = repo
        .create_task(&NewTask::new("done already", "").with_status(true))
        .unwrap();
    assert!(created.status);
    assert!(repo.get_task(created.id).unwrap().unwrap().status);
}

#[test]
fn created_ids_are_fresh_and_never_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut seen = HashSet::new();
    let mut last = None;
    for index in 0..5 {
        let task = repo
            .create_task(&NewTask::new(format!("Task-{index}"), ""))
            .unwrap();
        assert!(seen.insert(task.id), "id {} was reused", task.id);
        last = Some(task.id);
    }

    let last = last.unwrap();
    assert!(repo.delete_task(last).unwrap());
    let next = repo.create_task(&NewTask::new("after delete", "")).unwrap();
    assert!(next.id > last);
}

#[test]
fn blank_name_is_rejected_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let err = repo.create_task(&NewTask::new("  ", "desc")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::EmptyName)
    ));
    assert!(repo.list_tasks().unwrap().is_empty());
}

#[test]
fn list_returns_tasks_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    for name in ["Task-1", "Task-2", "Task-3"] {
        repo.create_task(&NewTask::new(name, "")).unwrap();
    }

    let names = repo
        .list_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.name)
        .collect::<Vec<_>>();
    assert_eq!(names, ["Task-1", "Task-2", "Task-3"]);
}

#[test]
fn update_status_keeps_other_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let created = repo.create_task(&NewTask::new("Task-1", "first")).unwrap();
    let updated = repo
        .update_task(created.id, &TaskPatch::status(true))
        .unwrap();
    assert!(updated.status);

    let loaded = repo.get_task(created.id).unwrap().unwrap();
    assert!(loaded.status);
    assert_eq!(loaded.name, "Task-1");
    assert_eq!(loaded.desc, "first");
}

#[test]
fn update_can_change_name_and_desc_together() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let created = repo.create_task(&NewTask::new("draft", "old")).unwrap();
    let patch = TaskPatch {
        name: Patch::Value("final".to_string()),
        desc: Patch::Value(String::new()),
        status: Patch::Absent,
    };
    let updated = repo.update_task(created.id, &patch).unwrap();

    assert_eq!(updated.name, "final");
    assert_eq!(updated.desc, "");
    assert!(!updated.status);
    assert_eq!(repo.get_task(created.id).unwrap().unwrap(), updated);
}

#[test]
fn update_missing_task_returns_not_found_and_leaves_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    repo.create_task(&NewTask::new("Task-1", "")).unwrap();
    let before = repo.list_tasks().unwrap();

    let err = repo.update_task(999, &TaskPatch::status(true)).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(999)));
    assert_eq!(repo.list_tasks().unwrap(), before);
}

#[test]
fn null_patch_field_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let created = repo.create_task(&NewTask::new("Task-1", "keep")).unwrap();

    let patch = TaskPatch {
        desc: Patch::Null,
        ..TaskPatch::default()
    };
    let err = repo.update_task(created.id, &patch).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::NullField("desc"))
    ));
    assert_eq!(repo.get_task(created.id).unwrap().unwrap().desc, "keep");
}

#[test]
fn delete_reports_whether_a_row_was_removed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let created = repo.create_task(&NewTask::new("Task-1", "")).unwrap();

    assert!(repo.delete_task(created.id).unwrap());
    assert!(repo.get_task(created.id).unwrap().is_none());
    assert!(!repo.delete_task(created.id).unwrap());
}

#[test]
fn invalid_persisted_status_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let created = repo.create_task(&NewTask::new("Task-1", "")).unwrap();

    // Bypass the CHECK constraint to simulate a foreign writer.
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute("UPDATE tasks SET status = 7 WHERE id = ?1;", [created.id])
        .unwrap();

    let err = repo.get_task(created.id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
