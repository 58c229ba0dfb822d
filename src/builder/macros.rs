//! Macros for ergonomic state definitions.

/// Generate a `State` implementation for a simple enum.
///
/// Variants not listed under `initial`, `direct` or `final` are
/// [`StateType::Normal`](crate::core::StateType::Normal). The lists must
/// appear in that order, followed by `error`.
///
/// # Example
///
/// ```
/// use waypoint::state_enum;
/// use waypoint::core::{State, StateType};
///
/// state_enum! {
///     pub enum OrderState {
///         Draft,
///         Paid,
///         Routing,
///         Shipped,
///         Refunded,
///     }
///     initial: [Draft]
///     direct: [Routing]
///     final: [Shipped, Refunded]
///     error: [Refunded]
/// }
///
/// assert_eq!(OrderState::Routing.state_type(), StateType::Direct);
/// assert_eq!(OrderState::Paid.name(), "Paid");
/// assert!(OrderState::Refunded.is_error());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(initial: [$($initial:ident),* $(,)?])?
        $(direct: [$($direct:ident),* $(,)?])?
        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn state_type(&self) -> $crate::core::StateType {
                match self {
                    $($(Self::$initial => $crate::core::StateType::Initial,)*)?
                    $($(Self::$direct => $crate::core::StateType::Direct,)*)?
                    $($(Self::$final => $crate::core::StateType::Final,)*)?
                    #[allow(unreachable_patterns)]
                    _ => $crate::core::StateType::Normal,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}
