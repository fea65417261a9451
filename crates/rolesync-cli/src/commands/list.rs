//! List command implementation

use std::path::Path;

use colored::Colorize;

use rolesync_store::{FileRoleStore, RoleStore};

use crate::error::Result;

/// Run the list command
pub fn run_list(store_path: &Path) -> Result<()> {
    let store = FileRoleStore::open(store_path)?;

    let mut roles = store.all_roles()?;
    roles.sort();

    if roles.is_empty() {
        println!("No roles in {}", store_path.display());
        return Ok(());
    }

    for role in roles {
        let mut parents: Vec<_> = store.member_of_roles(&role)?.into_iter().collect();
        parents.sort();

        if parents.is_empty() {
            println!("{}", role.to_string().cyan());
        } else {
            let parents = parents
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            println!("{} {} {}", role.to_string().cyan(), "->".dimmed(), parents);
        }
    }

    Ok(())
}
