//! The hook table macro.
//!
//! Each row binds one hook name to its wire name, execution model, event
//! type and handler output type. The macro expands the table into the
//! [`HookName`](crate::hooks::definitions::HookName) enum, the
//! [`HandlerKind`](crate::hooks::definitions::HandlerKind) tagged union,
//! and one marker type per hook in the `hook` module.
//!
//! ```rust,ignore
//! declare_hooks! {
//!     /// Filters the tool list offered to an agent.
//!     ToolsFilter => "tools-filter", Modifying, ToolsFilterEvent => ToolsFilterOutput;
//! }
//! ```

macro_rules! declare_hooks {
    (
        $(
            $(#[doc = $doc:literal])*
            $variant:ident => $name:literal, $model:ident, $event:ty => $output:ty;
        )+
    ) => {
        /// Every extension point the runner knows about.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum HookName {
            $(
                $(#[doc = $doc])*
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl HookName {
            /// All hook names, in declaration order.
            pub const ALL: &'static [HookName] = &[$(HookName::$variant),+];

            /// Returns the string name of this hook.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Returns the execution model bound to this hook.
            pub fn model(&self) -> $crate::hooks::definitions::ExecutionModel {
                match self {
                    $(Self::$variant => $crate::hooks::definitions::ExecutionModel::$model,)+
                }
            }
        }

        /// A handler tagged with the hook it belongs to.
        pub enum HandlerKind {
            $(
                $(#[doc = $doc])*
                $variant(::std::sync::Arc<dyn $crate::traits::HookHandler<$event, $output>>),
            )+
        }

        impl HandlerKind {
            /// Returns the hook this handler is registered for.
            pub fn hook_name(&self) -> HookName {
                match self {
                    $(Self::$variant(_) => HookName::$variant,)+
                }
            }
        }

        impl ::std::fmt::Debug for HandlerKind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_tuple("HandlerKind").field(&self.hook_name()).finish()
            }
        }

        /// Marker types naming each hook at the type level.
        pub mod hook {
            use super::*;

            $(
                $(#[doc = $doc])*
                #[derive(Debug, Clone, Copy)]
                pub struct $variant;

                impl $crate::hooks::definitions::Hook for $variant {
                    const NAME: HookName = HookName::$variant;
                    type Event = $event;
                    type Output = $output;

                    fn wrap(
                        handler: ::std::sync::Arc<dyn $crate::traits::HookHandler<$event, $output>>,
                    ) -> HandlerKind {
                        HandlerKind::$variant(handler)
                    }

                    #[allow(unreachable_patterns)]
                    fn unwrap(
                        kind: &HandlerKind,
                    ) -> Option<&::std::sync::Arc<dyn $crate::traits::HookHandler<$event, $output>>> {
                        match kind {
                            HandlerKind::$variant(handler) => Some(handler),
                            _ => None,
                        }
                    }
                }
            )+
        }
    };
}
