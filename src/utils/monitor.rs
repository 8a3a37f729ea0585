#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

/// Logs process CPU and memory after each pipeline phase when enabled.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    state: Option<MonitorState>,
}

#[cfg(feature = "cli")]
struct MonitorState {
    system: Mutex<System>,
    pid: Pid,
    started: Instant,
    peak_memory_mb: Mutex<u64>,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self { state: None };
        }

        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(e) => {
                tracing::warn!("System monitoring unavailable: {}", e);
                return Self { state: None };
            }
        };

        let mut system = System::new_with_specifics(RefreshKind::everything());
        system.refresh_all();

        Self {
            state: Some(MonitorState {
                system: Mutex::new(system),
                pid,
                started: Instant::now(),
                peak_memory_mb: Mutex::new(0),
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }

    pub fn log_stats(&self, phase: &str) {
        let Some(state) = &self.state else {
            return;
        };
        let Ok(mut system) = state.system.lock() else {
            return;
        };
        system.refresh_all();

        let Some(process) = system.process(state.pid) else {
            return;
        };
        let memory_mb = process.memory() / 1024 / 1024;
        let peak = match state.peak_memory_mb.lock() {
            Ok(mut peak) => {
                *peak = (*peak).max(memory_mb);
                *peak
            }
            Err(_) => memory_mb,
        };

        tracing::info!(
            phase,
            cpu_percent = process.cpu_usage(),
            memory_mb,
            peak_memory_mb = peak,
            elapsed_ms = state.started.elapsed().as_millis() as u64,
            "📊 resource usage"
        );
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn is_enabled(&self) -> bool {
        false
    }

    pub fn log_stats(&self, _phase: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_is_silent() {
        let monitor = SystemMonitor::new(false);
        assert!(!monitor.is_enabled());
        monitor.log_stats("extract");
    }
}
