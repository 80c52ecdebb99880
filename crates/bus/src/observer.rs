//! Observer capability

/// Receives every published buffer
///
/// Called from whichever thread published. The buffer is only valid for the
/// duration of the call; copy it to keep it.
pub trait Observer: Send + Sync {
    fn notify(&self, buffer: &[u8]);
}

impl<F> Observer for F
where
    F: Fn(&[u8]) + Send + Sync,
{
    fn notify(&self, buffer: &[u8]) {
        self(buffer)
    }
}
