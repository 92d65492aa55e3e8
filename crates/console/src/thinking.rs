//! Randomized "thinking" pause before a response is shown

use std::time::Duration;

use rand::Rng;

use copy_assistant_config::ConsoleSettings;

#[derive(Debug, Clone, Copy)]
pub struct ThinkingDelay {
    min_ms: u64,
    max_ms: u64,
    enabled: bool,
}

impl ThinkingDelay {
    pub fn from_settings(settings: &ConsoleSettings) -> Self {
        Self {
            min_ms: settings.thinking_delay_min_ms.min(settings.thinking_delay_max_ms),
            max_ms: settings.thinking_delay_max_ms.max(settings.thinking_delay_min_ms),
            enabled: settings.thinking_delay,
        }
    }

    pub fn disabled() -> Self {
        Self {
            min_ms: 0,
            max_ms: 0,
            enabled: false,
        }
    }

    /// Pick a duration in `[min, max]`; zero when disabled
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        Duration::from_millis(rng.gen_range(self.min_ms..=self.max_ms))
    }

    pub async fn wait(&self) {
        let delay = self.sample(&mut rand::thread_rng());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
