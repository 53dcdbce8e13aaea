/// Returned by everything that is driven by animation ticks.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickResponse {
    /// At least one animation is still running, keep sending ticks.
    Continue,
    /// Nothing is animating anymore.
    Stop,
}

impl TickResponse {
    pub fn wants_ticks(self) -> bool {
        self == TickResponse::Continue
    }

    /// Continue if any of the two wants to continue.
    pub fn or(self, other: TickResponse) -> TickResponse {
        if self.wants_ticks() || other.wants_ticks() {
            TickResponse::Continue
        } else {
            TickResponse::Stop
        }
    }
}
