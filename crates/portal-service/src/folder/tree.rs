//! Folder tree assembly from flat rows.
//!
//! Pure function: takes the client's folder and file rows and produces
//! an immutable tree snapshot. Building twice from the same input
//! yields structurally identical trees.

use std::cmp::Ordering;
use std::collections::HashMap;

use uuid::Uuid;

use portal_entity::file::ClientFile;
use portal_entity::folder::tree::{FolderNode, FolderTree};
use portal_entity::folder::{Folder, FolderType, ROOT_ADMINISTRACION, month_order};

/// Builds a client's folder tree from flat folder and file rows.
///
/// Files attach to their folder by `folder_id`; files with no folder go
/// to the tree's `unfiled` list. Folders whose parent id is absent from
/// the input are dropped silently.
pub fn build_tree(client_name: &str, folders: Vec<Folder>, files: Vec<ClientFile>) -> FolderTree {
    let mut files_by_folder: HashMap<Uuid, Vec<ClientFile>> = HashMap::new();
    let mut unfiled: Vec<ClientFile> = Vec::new();

    for file in files {
        match file.folder_id {
            Some(folder_id) => files_by_folder.entry(folder_id).or_default().push(file),
            None => unfiled.push(file),
        }
    }

    let mut children_by_parent: HashMap<Uuid, Vec<&Folder>> = HashMap::new();
    let known_ids: std::collections::HashSet<Uuid> = folders.iter().map(|f| f.id).collect();
    let mut roots: Vec<&Folder> = Vec::new();

    for folder in &folders {
        match folder.parent_id {
            None => roots.push(folder),
            Some(parent_id) if known_ids.contains(&parent_id) => {
                children_by_parent.entry(parent_id).or_default().push(folder);
            }
            // Orphan: the parent row is gone, drop the folder.
            Some(_) => {}
        }
    }

    roots.sort_by(|a, b| compare_siblings(a, b));

    let roots = roots
        .into_iter()
        .map(|folder| build_node(folder, &children_by_parent, &mut files_by_folder))
        .collect();

    FolderTree {
        client_name: client_name.to_string(),
        roots,
        unfiled,
    }
}

fn build_node(
    folder: &Folder,
    children_by_parent: &HashMap<Uuid, Vec<&Folder>>,
    files_by_folder: &mut HashMap<Uuid, Vec<ClientFile>>,
) -> FolderNode {
    let mut child_folders: Vec<&Folder> = children_by_parent
        .get(&folder.id)
        .map(|v| v.to_vec())
        .unwrap_or_default();
    child_folders.sort_by(|a, b| compare_siblings(a, b));

    let children = child_folders
        .into_iter()
        .map(|child| build_node(child, children_by_parent, files_by_folder))
        .collect();

    FolderNode {
        id: folder.id,
        folder_name: folder.folder_name.clone(),
        folder_type: folder.folder_type,
        is_default: folder.is_default,
        files: files_by_folder.remove(&folder.id).unwrap_or_default(),
        children,
    }
}

/// Display order between two sibling folders.
///
/// Years sort newest first; months follow the calendar; among roots
/// Administración comes first; everything else is name-ascending.
pub fn compare_siblings(a: &Folder, b: &Folder) -> Ordering {
    match (a.folder_type, b.folder_type) {
        (FolderType::Year, FolderType::Year) => b.folder_name.cmp(&a.folder_name),
        (FolderType::Month, FolderType::Month) => {
            month_order(&a.folder_name).cmp(&month_order(&b.folder_name))
        }
        (FolderType::Root, FolderType::Root) => {
            let a_admin = a.folder_name == ROOT_ADMINISTRACION;
            let b_admin = b.folder_name == ROOT_ADMINISTRACION;
            match (a_admin, b_admin) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => a.folder_name.cmp(&b.folder_name),
            }
        }
        _ => a.folder_name.cmp(&b.folder_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use portal_entity::folder::ROOT_CONTABILIDAD;

    fn folder(
        name: &str,
        folder_type: FolderType,
        parent_id: Option<Uuid>,
    ) -> Folder {
        Folder {
            id: Uuid::new_v4(),
            client_name: "Acme C.A.".to_string(),
            folder_name: name.to_string(),
            parent_id,
            folder_type,
            is_default: true,
            created_at: Utc::now(),
        }
    }

    fn file_in(folder_id: Option<Uuid>, name: &str) -> ClientFile {
        ClientFile {
            id: Uuid::new_v4(),
            client_name: "Acme C.A.".to_string(),
            file_name: name.to_string(),
            file_path: format!("Acme C.A./{name}"),
            file_size: Some(10),
            folder_id,
            uploaded_at: Utc::now(),
            uploaded_by: "admin".to_string(),
            user_id: None,
        }
    }

    #[test]
    fn test_years_sort_descending() {
        let root = folder(ROOT_ADMINISTRACION, FolderType::Root, None);
        let folders = vec![
            root.clone(),
            folder("2023", FolderType::Year, Some(root.id)),
            folder("2025", FolderType::Year, Some(root.id)),
            folder("2024", FolderType::Year, Some(root.id)),
        ];

        let tree = build_tree("Acme C.A.", folders, vec![]);
        let names: Vec<&str> = tree.roots[0]
            .children
            .iter()
            .map(|c| c.folder_name.as_str())
            .collect();
        assert_eq!(names, vec!["2025", "2024", "2023"]);
    }

    #[test]
    fn test_months_sort_by_calendar() {
        let parent = folder("Estado Financiero", FolderType::Category, None);
        let folders = vec![
            parent.clone(),
            folder("Marzo", FolderType::Month, Some(parent.id)),
            folder("Enero", FolderType::Month, Some(parent.id)),
            folder("Diciembre", FolderType::Month, Some(parent.id)),
        ];

        let tree = build_tree("Acme C.A.", folders, vec![]);
        let names: Vec<&str> = tree.roots[0]
            .children
            .iter()
            .map(|c| c.folder_name.as_str())
            .collect();
        assert_eq!(names, vec!["Enero", "Marzo", "Diciembre"]);
    }

    #[test]
    fn test_unknown_months_sort_last() {
        let parent = folder("Estado Financiero", FolderType::Category, None);
        let folders = vec![
            parent.clone(),
            folder("Cierre", FolderType::Month, Some(parent.id)),
            folder("Diciembre", FolderType::Month, Some(parent.id)),
        ];

        let tree = build_tree("Acme C.A.", folders, vec![]);
        let names: Vec<&str> = tree.roots[0]
            .children
            .iter()
            .map(|c| c.folder_name.as_str())
            .collect();
        assert_eq!(names, vec!["Diciembre", "Cierre"]);
    }

    #[test]
    fn test_administracion_root_sorts_first() {
        let folders = vec![
            folder(ROOT_CONTABILIDAD, FolderType::Root, None),
            folder(ROOT_ADMINISTRACION, FolderType::Root, None),
        ];

        let tree = build_tree("Acme C.A.", folders, vec![]);
        assert_eq!(tree.roots[0].folder_name, ROOT_ADMINISTRACION);
        assert_eq!(tree.roots[1].folder_name, ROOT_CONTABILIDAD);
    }

    #[test]
    fn test_custom_siblings_sort_by_name() {
        let parent = folder("2025", FolderType::Year, None);
        let folders = vec![
            parent.clone(),
            folder("Recibos", FolderType::Custom, Some(parent.id)),
            folder("Actas", FolderType::Custom, Some(parent.id)),
        ];

        let tree = build_tree("Acme C.A.", folders, vec![]);
        let names: Vec<&str> = tree.roots[0]
            .children
            .iter()
            .map(|c| c.folder_name.as_str())
            .collect();
        assert_eq!(names, vec!["Actas", "Recibos"]);
    }

    #[test]
    fn test_orphans_are_dropped() {
        let root = folder(ROOT_ADMINISTRACION, FolderType::Root, None);
        let orphan = folder("Perdido", FolderType::Custom, Some(Uuid::new_v4()));
        let tree = build_tree("Acme C.A.", vec![root, orphan], vec![]);
        assert_eq!(tree.total_folders(), 1);
    }

    #[test]
    fn test_files_attach_to_folders_and_unfiled() {
        let root = folder(ROOT_ADMINISTRACION, FolderType::Root, None);
        let files = vec![
            file_in(Some(root.id), "planilla.pdf"),
            file_in(None, "suelto.pdf"),
        ];

        let tree = build_tree("Acme C.A.", vec![root], files);
        assert_eq!(tree.roots[0].files.len(), 1);
        assert_eq!(tree.roots[0].files[0].file_name, "planilla.pdf");
        assert_eq!(tree.unfiled.len(), 1);
        assert_eq!(tree.unfiled[0].file_name, "suelto.pdf");
    }

    #[test]
    fn test_building_twice_is_deterministic() {
        let root = folder(ROOT_ADMINISTRACION, FolderType::Root, None);
        let year = folder("2025", FolderType::Year, Some(root.id));
        let folders = vec![root, year];

        let a = build_tree("Acme C.A.", folders.clone(), vec![]);
        let b = build_tree("Acme C.A.", folders, vec![]);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }
}
