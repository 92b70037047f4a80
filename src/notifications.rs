/// Desktop notification support
/// Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

/// Send a notification when a slot's time is up
pub fn notify_slot_finished(task_name: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "🕯️ {}" with title "Twelve Days - The verse is complete""#,
            task_name.replace('"', "\\\"")
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::debug!(error = %e, "notification failed");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = task_name;
    }
}
