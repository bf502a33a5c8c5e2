//! Default folder structure provisioning.
//!
//! Planning is pure (`baseline_plan`, `year_plan`) and execution is a
//! thin depth-first insert loop, so the structure itself is testable
//! without a database.

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use portal_core::error::AppError;
use portal_database::repositories::folder::FolderStore;
use portal_entity::folder::{
    CreateFolder, Folder, FolderType, MONTH_NAMES, ROOT_ADMINISTRACION, ROOT_CONTABILIDAD,
};

/// Categories provisioned under an Administración year folder.
const ADMIN_CATEGORIES: [&str; 4] = ["Faov", "IVSS", "Patente", "Inces"];

/// Category provisioned under a Contabilidad year folder; holds the
/// twelve month folders.
const CONTAB_CATEGORY: &str = "Estado Financiero";

/// A planned folder and its planned children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderSpec {
    pub name: String,
    pub folder_type: FolderType,
    pub children: Vec<FolderSpec>,
}

impl FolderSpec {
    fn new(name: impl Into<String>, folder_type: FolderType) -> Self {
        Self {
            name: name.into(),
            folder_type,
            children: Vec::new(),
        }
    }

    fn with_children(mut self, children: Vec<FolderSpec>) -> Self {
        self.children = children;
        self
    }

    /// Total number of folders in this spec, including self.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(FolderSpec::count).sum::<usize>()
    }
}

/// Which default root a year subtree belongs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// The Administración root.
    Admin,
    /// The Contabilidad root.
    Contab,
}

impl RootKind {
    /// The root folder's display name.
    pub fn folder_name(&self) -> &'static str {
        match self {
            Self::Admin => ROOT_ADMINISTRACION,
            Self::Contab => ROOT_CONTABILIDAD,
        }
    }
}

impl FromStr for RootKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "contab" => Ok(Self::Contab),
            _ => Err(AppError::validation(format!(
                "Invalid root kind: '{s}'. Expected 'admin' or 'contab'"
            ))),
        }
    }
}

/// Plans the year subtree for one root: the year folder plus the
/// categories (and months) that belong under that root.
pub fn year_plan(kind: RootKind, year: i32) -> FolderSpec {
    let categories = match kind {
        RootKind::Admin => ADMIN_CATEGORIES
            .iter()
            .map(|name| FolderSpec::new(*name, FolderType::Category))
            .collect(),
        RootKind::Contab => vec![
            FolderSpec::new(CONTAB_CATEGORY, FolderType::Category).with_children(
                MONTH_NAMES
                    .iter()
                    .map(|name| FolderSpec::new(*name, FolderType::Month))
                    .collect(),
            ),
        ],
    };

    FolderSpec::new(year.to_string(), FolderType::Year).with_children(categories)
}

/// Plans the complete baseline structure for a new client: both roots,
/// each holding the given year's subtree.
pub fn baseline_plan(year: i32) -> Vec<FolderSpec> {
    vec![
        FolderSpec::new(ROOT_ADMINISTRACION, FolderType::Root)
            .with_children(vec![year_plan(RootKind::Admin, year)]),
        FolderSpec::new(ROOT_CONTABILIDAD, FolderType::Root)
            .with_children(vec![year_plan(RootKind::Contab, year)]),
    ]
}

/// Executes folder plans against the repository.
#[derive(Debug, Clone)]
pub struct Provisioner {
    folder_repo: Arc<dyn FolderStore>,
}

impl Provisioner {
    /// Creates a new provisioner.
    pub fn new(folder_repo: Arc<dyn FolderStore>) -> Self {
        Self { folder_repo }
    }

    /// Provisions the baseline structure for a client that has no
    /// folders yet. A client with any existing folder is left untouched.
    ///
    /// Inserts are not transactional: a mid-sequence failure leaves a
    /// partial structure and surfaces the underlying error.
    pub async fn ensure_baseline(&self, client_name: &str, year: i32) -> Result<(), AppError> {
        let existing = self.folder_repo.count_by_client(client_name).await?;
        if existing > 0 {
            return Ok(());
        }

        for spec in baseline_plan(year) {
            self.insert_spec(client_name, &spec, None).await?;
        }

        info!(client = %client_name, year, "Provisioned baseline folder structure");
        Ok(())
    }

    /// Creates the year subtree for one root, optionally deleting the
    /// root's previous year folders. Returns the created year folder.
    ///
    /// The cascade on the folder table removes descendants and attached
    /// file records of any deleted year.
    pub async fn add_year(
        &self,
        client_name: &str,
        year: i32,
        kind: RootKind,
        delete_previous: bool,
    ) -> Result<Folder, AppError> {
        let root = self
            .folder_repo
            .find_root_by_name(client_name, kind.folder_name())
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Root folder '{}' not found for client",
                    kind.folder_name()
                ))
            })?;

        let plan = year_plan(kind, year);
        let created = self.insert_spec(client_name, &plan, Some(root.id)).await?;

        if delete_previous {
            let year_name = year.to_string();
            let siblings = self.folder_repo.find_year_children(root.id).await?;
            for sibling in siblings {
                if sibling.folder_name != year_name {
                    self.folder_repo.delete(sibling.id).await?;
                }
            }
        }

        info!(
            client = %client_name,
            root = kind.folder_name(),
            year,
            delete_previous,
            "Added year structure"
        );
        Ok(created)
    }

    /// Inserts a spec subtree depth-first under the given parent and
    /// returns the created top-level folder.
    async fn insert_spec(
        &self,
        client_name: &str,
        spec: &FolderSpec,
        parent_id: Option<Uuid>,
    ) -> Result<Folder, AppError> {
        let folder = self
            .folder_repo
            .create(&CreateFolder {
                client_name: client_name.to_string(),
                folder_name: spec.name.clone(),
                parent_id,
                folder_type: spec.folder_type,
                is_default: true,
            })
            .await?;

        for child in &spec.children {
            Box::pin(self.insert_spec(client_name, child, Some(folder.id))).await?;
        }

        Ok(folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use portal_core::result::AppResult;
    use std::sync::Mutex;

    /// In-memory folder store with the schema's delete cascade.
    #[derive(Debug, Default)]
    struct MemoryFolderStore {
        rows: Mutex<Vec<Folder>>,
    }

    impl MemoryFolderStore {
        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        fn names(&self) -> Vec<String> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .map(|f| f.folder_name.clone())
                .collect()
        }
    }

    #[async_trait]
    impl FolderStore for MemoryFolderStore {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|f| f.id == id)
                .cloned())
        }

        async fn find_by_client(&self, client_name: &str) -> AppResult<Vec<Folder>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.client_name == client_name)
                .cloned()
                .collect())
        }

        async fn count_by_client(&self, client_name: &str) -> AppResult<u64> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.client_name == client_name)
                .count() as u64)
        }

        async fn find_root_by_name(
            &self,
            client_name: &str,
            folder_name: &str,
        ) -> AppResult<Option<Folder>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|f| {
                    f.client_name == client_name
                        && f.folder_name == folder_name
                        && f.parent_id.is_none()
                })
                .cloned())
        }

        async fn find_year_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.parent_id == Some(parent_id) && f.folder_type == FolderType::Year)
                .cloned()
                .collect())
        }

        async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
            let folder = Folder {
                id: Uuid::new_v4(),
                client_name: data.client_name.clone(),
                folder_name: data.folder_name.clone(),
                parent_id: data.parent_id,
                folder_type: data.folder_type,
                is_default: data.is_default,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(folder.clone());
            Ok(folder)
        }

        async fn delete(&self, folder_id: Uuid) -> AppResult<bool> {
            let mut rows = self.rows.lock().unwrap();
            let mut doomed = vec![folder_id];
            let mut removed = false;
            while let Some(id) = doomed.pop() {
                doomed.extend(rows.iter().filter(|f| f.parent_id == Some(id)).map(|f| f.id));
                let before = rows.len();
                rows.retain(|f| f.id != id);
                removed |= rows.len() != before;
            }
            Ok(removed)
        }
    }

    #[test]
    fn test_baseline_has_two_roots() {
        let plan = baseline_plan(2025);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].name, ROOT_ADMINISTRACION);
        assert_eq!(plan[1].name, ROOT_CONTABILIDAD);
        assert!(plan.iter().all(|s| s.folder_type == FolderType::Root));
    }

    #[test]
    fn test_each_root_has_one_year_folder() {
        let plan = baseline_plan(2025);
        for root in &plan {
            assert_eq!(root.children.len(), 1);
            assert_eq!(root.children[0].name, "2025");
            assert_eq!(root.children[0].folder_type, FolderType::Year);
        }
    }

    #[test]
    fn test_admin_year_has_four_categories() {
        let year = year_plan(RootKind::Admin, 2025);
        let names: Vec<&str> = year.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Faov", "IVSS", "Patente", "Inces"]);
        assert!(
            year.children
                .iter()
                .all(|c| c.folder_type == FolderType::Category && c.children.is_empty())
        );
    }

    #[test]
    fn test_contab_year_has_statement_category_with_twelve_months() {
        let year = year_plan(RootKind::Contab, 2025);
        assert_eq!(year.children.len(), 1);

        let category = &year.children[0];
        assert_eq!(category.name, "Estado Financiero");
        assert_eq!(category.folder_type, FolderType::Category);
        assert_eq!(category.children.len(), 12);
        assert_eq!(category.children[0].name, "Enero");
        assert_eq!(category.children[11].name, "Diciembre");
        assert!(
            category
                .children
                .iter()
                .all(|c| c.folder_type == FolderType::Month)
        );
    }

    #[test]
    fn test_baseline_total_folder_count() {
        // 2 roots + 2 years + 4 admin categories + 1 contab category + 12 months
        let total: usize = baseline_plan(2025).iter().map(FolderSpec::count).sum();
        assert_eq!(total, 21);
    }

    #[test]
    fn test_root_kind_parsing() {
        assert_eq!("admin".parse::<RootKind>().unwrap(), RootKind::Admin);
        assert_eq!("contab".parse::<RootKind>().unwrap(), RootKind::Contab);
        assert!("finanzas".parse::<RootKind>().is_err());
    }

    #[tokio::test]
    async fn test_ensure_baseline_inserts_full_plan() {
        let store = Arc::new(MemoryFolderStore::default());
        let provisioner = Provisioner::new(store.clone());

        provisioner.ensure_baseline("Acme C.A.", 2025).await.unwrap();

        assert_eq!(store.len(), 21);
        assert!(store.names().contains(&ROOT_ADMINISTRACION.to_string()));
        assert!(store.names().contains(&"Diciembre".to_string()));
    }

    #[tokio::test]
    async fn test_ensure_baseline_is_noop_when_folders_exist() {
        let store = Arc::new(MemoryFolderStore::default());
        store
            .create(&CreateFolder {
                client_name: "Acme C.A.".to_string(),
                folder_name: "Recibos".to_string(),
                parent_id: None,
                folder_type: FolderType::Custom,
                is_default: false,
            })
            .await
            .unwrap();

        let provisioner = Provisioner::new(store.clone());
        provisioner.ensure_baseline("Acme C.A.", 2025).await.unwrap();

        // A single pre-existing folder suppresses the whole plan.
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_baseline_second_call_adds_nothing() {
        let store = Arc::new(MemoryFolderStore::default());
        let provisioner = Provisioner::new(store.clone());

        provisioner.ensure_baseline("Acme C.A.", 2025).await.unwrap();
        provisioner.ensure_baseline("Acme C.A.", 2026).await.unwrap();

        assert_eq!(store.len(), 21);
    }

    #[tokio::test]
    async fn test_add_year_with_delete_previous_replaces_years() {
        let store = Arc::new(MemoryFolderStore::default());
        let provisioner = Provisioner::new(store.clone());
        provisioner.ensure_baseline("Acme C.A.", 2025).await.unwrap();

        let created = provisioner
            .add_year("Acme C.A.", 2026, RootKind::Admin, true)
            .await
            .unwrap();

        assert_eq!(created.folder_name, "2026");
        let names = store.names();
        // The 2025 admin subtree is gone; the contab side keeps its year.
        assert_eq!(names.iter().filter(|n| *n == "2025").count(), 1);
        assert!(names.contains(&"2026".to_string()));
    }

    #[tokio::test]
    async fn test_add_year_without_root_is_not_found() {
        let store = Arc::new(MemoryFolderStore::default());
        let provisioner = Provisioner::new(store);

        let err = provisioner
            .add_year("Acme C.A.", 2026, RootKind::Contab, false)
            .await
            .unwrap_err();
        assert_eq!(err.kind, portal_core::error::ErrorKind::NotFound);
    }
}
