/// Running counters for one engine session.
///
/// Updated inline by the engine as it processes input; read-only to callers.
/// These are in-process diagnostics only, there is no export pipeline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngineMetrics {
    pub moves: u64,
    pub position_updates: u64,
    pub position_updates_ignored: u64,
    pub pickups: u64,
    pub crafts: u64,
    pub rejected_actions: u64,
    pub saves: u64,
    pub save_failures: u64,
    pub resets: u64,
}

impl EngineMetrics {
    /// Successful interactions of either kind.
    pub fn transitions(&self) -> u64 {
        self.pickups + self.crafts
    }
}
