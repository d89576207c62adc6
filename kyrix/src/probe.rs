use std::process::{Command, Stdio};

use create_kyrix_core::PackageManager;
use log::debug;

/// Package managers that answer `<name> -v`, in probe order.
pub fn available_managers() -> Vec<PackageManager> {
    PackageManager::ALL
        .into_iter()
        .filter(|pm| is_installed(*pm))
        .collect()
}

fn is_installed(pm: PackageManager) -> bool {
    let installed = Command::new(pm.as_str())
        .arg("-v")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success());
    debug!("{pm}: {}", if installed { "found" } else { "not found" });
    installed
}
