use std::collections::VecDeque;

use contentcraft_core::{wrap, SignBudget};
use contentcraft_world::{PlacementError, RenderHost};

use crate::{PlacementEvent, PlacementListener};

/// Prefix of the attribution line shown under a folder name.
pub const ATTRIBUTION_PREFIX: &str = "Created By     ";

/// Attribution line for a folder created by `creator`.
pub fn attribution(creator: &str) -> String {
    format!("{ATTRIBUTION_PREFIX}{creator}")
}

/// Ordered labels handed out one per sign placement.
///
/// Signs beyond the supplied labels receive an empty label; labels beyond the number of signs
/// are left unused. Empty labels leave the sign blank.
#[derive(Debug, Clone)]
pub struct SignQueue {
    pending: VecDeque<String>,
    assigned: Vec<String>,
    budget: SignBudget,
}

impl SignQueue {
    /// Queue `labels` for signs of the given size.
    pub fn new<I, S>(labels: I, budget: SignBudget) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pending: labels.into_iter().map(Into::into).collect(),
            assigned: Vec::new(),
            budget,
        }
    }

    /// Labels consumed so far, one per sign, in placement order.
    pub fn assigned(&self) -> &[String] {
        &self.assigned
    }

    /// Labels not yet consumed.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Consume the queue, returning the labels that were assigned.
    pub fn into_assigned(self) -> Vec<String> {
        self.assigned
    }
}

impl PlacementListener for SignQueue {
    fn on_placed(
        &mut self,
        event: &PlacementEvent<'_>,
        host: &mut dyn RenderHost,
    ) -> Result<(), PlacementError> {
        if !event.block.kind.is_signage() {
            return Ok(());
        }
        let label = self.pending.pop_front().unwrap_or_default();
        if !label.is_empty() {
            let lines = wrap(&label, self.budget);
            host.set_sign_lines(event.block, &lines)?;
        }
        self.assigned.push(label);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentcraft_core::BlockPos;
    use contentcraft_testkit::RecordingHost;
    use contentcraft_world::{BlockKind, BlockMeta};

    fn place(host: &mut RecordingHost, x: i32, kind: BlockKind) -> PlacementEvent<'static> {
        let block = host
            .place_block(BlockPos::new(x, 1, 0), kind, BlockMeta::default())
            .expect("placement");
        PlacementEvent {
            macro_name: "test",
            ordinal: x as usize,
            block,
        }
    }

    #[test]
    fn attribution_uses_padded_prefix() {
        assert_eq!(attribution("alice"), "Created By     alice");
    }

    #[test]
    fn labels_go_to_signs_only() {
        let mut host = RecordingHost::new();
        let mut queue = SignQueue::new(["Reports", "Created By     alice"], SignBudget::WALL_SIGN);

        for (x, kind) in [
            (0, BlockKind::Stone),
            (1, BlockKind::WallSign),
            (2, BlockKind::Planks),
            (3, BlockKind::WallSign),
        ] {
            let event = place(&mut host, x, kind);
            queue.on_placed(&event, &mut host).expect("sign write");
        }

        assert_eq!(queue.assigned(), ["Reports", "Created By     alice"]);
        assert_eq!(host.world().sign_lines(BlockPos::new(1, 1, 0)), ["Reports"]);
        assert_eq!(
            host.world().sign_lines(BlockPos::new(3, 1, 0)),
            ["Created By", "alice"]
        );
    }

    #[test]
    fn extra_signs_get_empty_labels() {
        let mut host = RecordingHost::new();
        let mut queue = SignQueue::new(["only"], SignBudget::WALL_SIGN);
        for x in 0..3 {
            let event = place(&mut host, x, BlockKind::WallSign);
            queue.on_placed(&event, &mut host).unwrap();
        }
        assert_eq!(queue.assigned(), ["only", "", ""]);
        assert_eq!(host.sign_writes().len(), 1);
        assert_eq!(queue.remaining(), 0);
    }

    #[test]
    fn surplus_labels_stay_pending() {
        let mut host = RecordingHost::new();
        let mut queue = SignQueue::new(["a", "b", "c"], SignBudget::WALL_SIGN);
        let event = place(&mut host, 0, BlockKind::SignPost);
        queue.on_placed(&event, &mut host).unwrap();
        assert_eq!(queue.remaining(), 2);
        assert_eq!(queue.into_assigned(), vec!["a"]);
    }
}
