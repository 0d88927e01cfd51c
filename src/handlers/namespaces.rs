use std::path::Path;

use crate::bundle;
use crate::error::Result;

/// List namespace snapshots available in a bundle.
pub fn handle_namespaces(bundle_path: &Path) -> Result<()> {
    let names = bundle::namespaces(bundle_path)?;
    println!("Available namespace snapshots:");
    for name in names {
        println!("- {name}");
    }
    Ok(())
}
