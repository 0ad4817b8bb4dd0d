use resume_core::db::{open_db_in_memory, DbError};
use resume_core::{
    load_document, BasicsField, DocumentEdit, DocumentStore, ExperienceEntry, ExperienceField,
    FieldPath, ListItem, ListName, RepoError, RepoResult, ResumeDocument, SqliteStorageRepository,
    StorageRepository, StoreError, STORAGE_KEY,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

#[test]
fn empty_storage_loads_sample_document() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::load(SqliteStorageRepository::new(&conn));

    assert_eq!(store.document(), &ResumeDocument::sample());
    assert_eq!(
        store.document().skills,
        vec!["JavaScript", "React", "Node.js", "MongoDB", "Tailwind CSS"]
    );
}

#[test]
fn unreadable_or_null_storage_loads_sample_document() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStorageRepository::new(&conn);

    for stored in ["{not json", "null", "[1, 2]"] {
        repo.set_item(STORAGE_KEY, stored).unwrap();
        assert_eq!(load_document(&repo, STORAGE_KEY), ResumeDocument::sample());
    }
}

#[test]
fn stored_document_is_loaded_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStorageRepository::new(&conn);
    repo.set_item(
        STORAGE_KEY,
        r#"{"basics":{"name":"Ada"},"skills":["Rust"],"experience":[],"education":[],"projects":[]}"#,
    )
    .unwrap();

    let store = DocumentStore::load(repo);
    assert_eq!(store.document().basics.name, "Ada");
    assert_eq!(store.document().skills, vec!["Rust"]);
    assert!(store.document().experience.is_empty());
}

#[test]
fn storage_read_failure_loads_sample_document() {
    let storage = MemoryStorage::default();
    storage.fail_reads.set(true);

    let store = DocumentStore::load(storage);
    assert_eq!(store.document(), &ResumeDocument::sample());
}

#[test]
fn set_field_changes_only_the_addressed_field() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));
    let before = store.document().clone();

    store.set_field("basics.email", "new@x.com").unwrap();

    let mut expected = before;
    expected.basics.email = "new@x.com".to_string();
    assert_eq!(store.document(), &expected);
}

#[test]
fn set_field_reaches_nested_entries_and_bullets() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));

    store.set_field("experience.0.role", "Staff Engineer").unwrap();
    store.set_field("education.0.end", "2027").unwrap();
    store.set_field("projects.0.link", "https://example.com").unwrap();
    store.set_field("projects.0.bullets.0", "Shipped it").unwrap();
    store.set_field("skills.1", "React Native").unwrap();

    let doc = store.document();
    assert_eq!(doc.experience[0].role, "Staff Engineer");
    assert_eq!(doc.education[0].end, "2027");
    assert_eq!(doc.projects[0].link, "https://example.com");
    assert_eq!(doc.projects[0].bullets, vec!["Shipped it"]);
    assert_eq!(doc.skills[1], "React Native");
}

#[test]
fn set_field_rejects_unresolvable_paths_without_changes() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));
    let before = store.document().clone();

    for path in [
        "basics.nickname",
        "contact.email",
        "experience.5.company",
        "projects.0.bullets.9",
        "experience.0.bullets",
        "skills.99",
    ] {
        let err = store.set_field(path, "x").unwrap_err();
        assert!(
            matches!(err, StoreError::InvalidPath(ref p) if p == path),
            "path `{path}` gave {err}"
        );
    }

    assert_eq!(store.document(), &before);
    assert_eq!(load_document(store.repository(), STORAGE_KEY), before);
}

#[test]
fn skills_append_then_remove_scenario() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));

    store
        .append_item(ListItem::Skill("Go".to_string()))
        .unwrap();
    assert_eq!(store.document().skills.len(), 6);
    assert_eq!(store.document().skills.last().map(String::as_str), Some("Go"));

    store.remove_item(ListName::Skills, 0).unwrap();
    assert_eq!(
        store.document().skills,
        vec!["React", "Node.js", "MongoDB", "Tailwind CSS", "Go"]
    );
}

#[test]
fn remove_item_shifts_suffix_left_for_every_index() {
    let skills: Vec<String> = ["a", "b", "c", "d"].into_iter().map(String::from).collect();

    for index in 0..skills.len() {
        let conn = open_db_in_memory().unwrap();
        let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));
        store
            .replace_document(ResumeDocument {
                skills: skills.clone(),
                ..ResumeDocument::default()
            })
            .unwrap();

        store.remove_item(ListName::Skills, index).unwrap();

        let after = &store.document().skills;
        assert_eq!(after.len(), skills.len() - 1);
        assert_eq!(&after[..index], &skills[..index]);
        assert_eq!(&after[index..], &skills[index + 1..]);
    }
}

#[test]
fn remove_item_out_of_range_keeps_document() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));
    let before = store.document().clone();

    let err = store.remove_item(ListName::Education, 1).unwrap_err();
    match err {
        StoreError::IndexOutOfRange { target, index, len } => {
            assert_eq!(target, "education");
            assert_eq!(index, 1);
            assert_eq!(len, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.document(), &before);
}

#[test]
fn append_template_uses_add_placeholders() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));

    for list in ListName::ALL {
        store.append_template(list).unwrap();
    }

    let doc = store.document();
    assert_eq!(doc.skills.last().map(String::as_str), Some("New Skill"));
    assert_eq!(doc.experience.last(), Some(&ExperienceEntry::template()));
    assert_eq!(doc.experience.len(), 2);
    assert_eq!(doc.education.len(), 2);
    assert_eq!(
        doc.projects.last().map(|p| p.bullets.clone()),
        Some(vec!["What did you build and why it matters".to_string()])
    );
}

#[test]
fn update_list_element_replaces_entry_in_place() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));
    store.append_template(ListName::Experience).unwrap();

    store
        .update_list_element(ListName::Experience, 1, |item| match item {
            ListItem::Experience(mut entry) => {
                entry.company = "Acme".to_string();
                ListItem::Experience(entry)
            }
            other => other,
        })
        .unwrap();

    let doc = store.document();
    assert_eq!(doc.experience[0].company, "Your Company");
    assert_eq!(doc.experience[1].company, "Acme");
    assert_eq!(doc.experience[1].role, "Role");
}

#[test]
fn update_list_element_rejects_shape_change() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));
    let before = store.document().clone();

    let err = store
        .update_list_element(ListName::Education, 0, |_| {
            ListItem::Skill("not an education entry".to_string())
        })
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::ItemShapeMismatch {
            expected: ListName::Education,
            found: ListName::Skills
        }
    ));

    let err = store
        .update_list_element(ListName::Projects, 3, |item| item)
        .unwrap_err();
    assert!(matches!(err, StoreError::IndexOutOfRange { .. }));
    assert_eq!(store.document(), &before);
}

#[test]
fn update_skill_edits_in_place() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));

    store.update_skill(4, "Tailwind").unwrap();
    assert_eq!(store.document().skills[4], "Tailwind");
    assert!(matches!(
        store.update_skill(5, "x").unwrap_err(),
        StoreError::IndexOutOfRange { len: 5, .. }
    ));
}

#[test]
fn append_then_remove_bullet_is_identity() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));

    for list in [ListName::Experience, ListName::Projects] {
        let before = store.document().bullets(list, 0).unwrap().to_vec();
        store.append_bullet_template(list, 0).unwrap();
        let appended = store.document().bullets(list, 0).unwrap().to_vec();
        assert_eq!(appended.last().map(String::as_str), Some("New bullet"));

        store.remove_bullet(list, 0, appended.len() - 1).unwrap();
        assert_eq!(store.document().bullets(list, 0).unwrap(), before.as_slice());
    }
}

#[test]
fn bullet_edits_keep_order_and_scope_to_one_entry() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));
    store.append_template(ListName::Experience).unwrap();

    store
        .append_bullet(ListName::Experience, 0, "Third")
        .unwrap();
    store
        .update_bullet(ListName::Experience, 0, 1, "Second, edited")
        .unwrap();
    store.remove_bullet(ListName::Experience, 0, 0).unwrap();

    let doc = store.document();
    assert_eq!(
        doc.experience[0].bullets,
        vec!["Second, edited", "Third"]
    );
    assert_eq!(doc.experience[1].bullets, vec!["Describe your impact"]);
}

#[test]
fn bullet_operations_validate_list_and_indices() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));
    let before = store.document().clone();

    assert!(matches!(
        store.append_bullet(ListName::Education, 0, "x").unwrap_err(),
        StoreError::InvalidPath(_)
    ));
    assert!(matches!(
        store.append_bullet(ListName::Skills, 0, "x").unwrap_err(),
        StoreError::InvalidPath(_)
    ));
    assert!(matches!(
        store.append_bullet(ListName::Projects, 1, "x").unwrap_err(),
        StoreError::IndexOutOfRange { index: 1, len: 1, .. }
    ));
    match store.remove_bullet(ListName::Experience, 0, 2).unwrap_err() {
        StoreError::IndexOutOfRange { target, index, len } => {
            assert_eq!(target, "experience.0.bullets");
            assert_eq!(index, 2);
            assert_eq!(len, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(
        store
            .update_bullet(ListName::Projects, 0, 1, "x")
            .unwrap_err(),
        StoreError::IndexOutOfRange { .. }
    ));

    assert_eq!(store.document(), &before);
}

#[test]
fn apply_all_merges_edits_from_one_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));

    store
        .apply_all([
            DocumentEdit::UpdateBullet {
                list: ListName::Experience,
                entry: 0,
                bullet: 0,
                text: "first".to_string(),
            },
            DocumentEdit::UpdateBullet {
                list: ListName::Experience,
                entry: 0,
                bullet: 1,
                text: "second".to_string(),
            },
            DocumentEdit::SetField {
                path: FieldPath::Basics(BasicsField::Title),
                value: "draft".to_string(),
            },
            DocumentEdit::SetField {
                path: FieldPath::Basics(BasicsField::Title),
                value: "final".to_string(),
            },
        ])
        .unwrap();

    let doc = store.document();
    assert_eq!(doc.experience[0].bullets, vec!["first", "second"]);
    assert_eq!(doc.basics.title, "final");
    assert_eq!(&load_document(store.repository(), STORAGE_KEY), doc);
}

#[test]
fn apply_all_is_all_or_nothing() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));
    let before = store.document().clone();

    let err = store
        .apply_all([
            DocumentEdit::AppendItem(ListItem::Skill("Go".to_string())),
            DocumentEdit::SetField {
                path: FieldPath::Experience {
                    index: 7,
                    field: ExperienceField::Company,
                },
                value: "nowhere".to_string(),
            },
        ])
        .unwrap_err();

    assert!(matches!(err, StoreError::InvalidPath(ref p) if p == "experience.7.company"));
    assert_eq!(store.document(), &before);
}

#[test]
fn every_mutation_is_persisted() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));

    store.set_field("basics.name", "Grace Hopper").unwrap();
    assert_persisted(&store);
    store.append_template(ListName::Projects).unwrap();
    assert_persisted(&store);
    store
        .append_bullet(ListName::Projects, 1, "Compiler")
        .unwrap();
    assert_persisted(&store);
    store.remove_item(ListName::Education, 0).unwrap();
    assert_persisted(&store);
    store.update_skill(0, "COBOL").unwrap();
    assert_persisted(&store);
}

#[test]
fn reopening_store_restores_last_document() {
    let conn = open_db_in_memory().unwrap();
    {
        let mut store = DocumentStore::load(SqliteStorageRepository::new(&conn));
        store.set_field("basics.location", "Berlin").unwrap();
        store.remove_item(ListName::Skills, 4).unwrap();
    }

    let reopened = DocumentStore::load(SqliteStorageRepository::new(&conn));
    assert_eq!(reopened.document().basics.location, "Berlin");
    assert_eq!(reopened.document().skills.len(), 4);
}

#[test]
fn storage_keys_are_isolated() {
    let conn = open_db_in_memory().unwrap();
    let mut draft = DocumentStore::load_with_key(SqliteStorageRepository::new(&conn), "draft");
    draft.set_field("basics.name", "Draft Name").unwrap();
    assert_eq!(draft.storage_key(), "draft");

    let main = DocumentStore::load(SqliteStorageRepository::new(&conn));
    assert_eq!(main.document().basics.name, "Amit Kumar");
}

#[test]
fn failed_write_keeps_prior_snapshot() {
    let mut store = DocumentStore::load(MemoryStorage::default());
    store.set_field("basics.name", "Persisted").unwrap();

    store.repository().fail_writes.set(true);
    let err = store.set_field("basics.name", "Lost").unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));
    assert_eq!(store.document().basics.name, "Persisted");

    store.repository().fail_writes.set(false);
    assert_eq!(
        load_document(store.repository(), STORAGE_KEY).basics.name,
        "Persisted"
    );
}

fn assert_persisted(store: &DocumentStore<SqliteStorageRepository<'_>>) {
    assert_eq!(
        &load_document(store.repository(), STORAGE_KEY),
        store.document()
    );
}

#[derive(Default)]
struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryStorage {
    fn unavailable() -> RepoError {
        RepoError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery))
    }
}

impl StorageRepository for MemoryStorage {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(Self::unavailable());
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(Self::unavailable());
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> RepoResult<bool> {
        Ok(self.values.borrow_mut().remove(key).is_some())
    }
}
