/// User-facing success notification channel, the toast analog. The test-mode
/// shim reports through this instead of printing directly so tests can
/// capture what was signalled. Errors are not notified; they propagate to
/// the caller.
pub trait Notifier {
	fn success(&self, message: &str);
}

/// Console notifier used by the CLI.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
	fn success(&self, message: &str) {
		println!("{}", message);
	}
}
