//! Seed data inspection commands.

use tillpoint_backoffice::store::UserDirectory;

use super::CliError;

/// List the seeded demo users.
///
/// # Errors
///
/// Returns `CliError::Serialize` if JSON output fails.
#[allow(clippy::print_stdout)]
pub fn list(json: bool) -> Result<(), CliError> {
    let users = UserDirectory::seeded().list();

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    println!(
        "{:<4} {:<16} {:<26} {:<6} {:<9} {:<9} {:<12}",
        "ID", "NAME", "EMAIL", "ROLE", "STATUS", "VERIFIED", "PERMISSIONS"
    );
    for user in users {
        println!(
            "{:<4} {:<16} {:<26} {:<6} {:<9} {:<9} {:<12}",
            user.id,
            user.name,
            user.email,
            user.role.to_string(),
            user.status.to_string(),
            if user.verified { "yes" } else { "no" },
            if user.is_primary_admin {
                "all (implicit)".to_owned()
            } else {
                user.permissions.len().to_string()
            },
        );
    }

    Ok(())
}
