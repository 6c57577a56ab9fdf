//! Macros for ergonomic machine construction.

/// Declare a key enum with the derives [`StateKey`](crate::StateKey)
/// requires.
///
/// # Example
///
/// ```
/// use clockstep::state_key;
///
/// state_key! {
///     pub enum Phase {
///         Idle,
///         Running,
///         Done,
///     }
/// }
///
/// assert_ne!(Phase::Idle, Phase::Running);
/// ```
#[macro_export]
macro_rules! state_key {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Fsm;

    state_key! {
        enum Door {
            Open,
            Closed,
        }
    }

    #[test]
    fn state_key_enum_drives_a_machine() {
        let fsm: Fsm<Door> = Fsm::new();
        fsm.edge(Door::Closed, Door::Open);

        fsm.start(Door::Closed).unwrap();
        fsm.transition(Door::Open);

        assert_eq!(fsm.current(), Some(Door::Open));
    }

    #[test]
    fn state_key_supports_visibility_and_metadata() {
        state_key! {
            /// Connection lifecycle.
            pub enum Conn {
                Idle,
                Active,
            }
        }

        let _conn = Conn::Idle;
    }
}
