/// Receives solver events and optionally steers the solver.
///
/// `E` is the event type a solver emits and `A` is the set of control actions
/// it understands. Returning `None` lets the solver continue unchanged.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

/// Blanket implementation for observer closures.
impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

/// A no-op observer that always returns `None`.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<O: Observer<u32, &'static str>>(mut observer: O, events: &[u32]) -> Vec<&'static str> {
        events
            .iter()
            .filter_map(|event| observer.observe(event))
            .collect()
    }

    #[test]
    fn unit_observer_never_acts() {
        assert!(drive((), &[1, 2, 3]).is_empty());
    }

    #[test]
    fn closure_observer_can_act_and_keep_state() {
        let mut seen = 0;
        let actions = drive(
            |event: &u32| {
                seen += 1;
                (*event > 1).then_some("stop")
            },
            &[1, 2, 3],
        );

        assert_eq!(actions, vec!["stop", "stop"]);
        assert_eq!(seen, 3);
    }
}
