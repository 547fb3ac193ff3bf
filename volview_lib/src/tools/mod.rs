//! Interaction tool bindings.
//!
//! Exactly one of rotate/pan/zoom owns the primary pointer button; the wheel
//! is permanently bound to zoom. Tools are a closed enumeration, so an
//! invalid binding is unrepresentable; names only exist at the UI boundary.

use std::str::FromStr;

use crate::error::UnknownName;

/// Interaction tool identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Rotate,
    Pan,
    Zoom,
}

impl FromStr for Tool {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rotate" => Ok(Tool::Rotate),
            "pan" => Ok(Tool::Pan),
            "zoom" => Ok(Tool::Zoom),
            _ => Err(UnknownName::new("tool", s)),
        }
    }
}

/// Input gesture classes tools can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    PrimaryButton,
    Wheel,
}

/// Gesture-to-tool bindings.
///
/// The machine has no terminal state; every transition passivates the primary
/// binding, re-asserts the wheel binding and activates the requested tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolBindings {
    primary: Tool,
    wheel: Tool,
}

impl ToolBindings {
    /// Initial bindings: rotate on the primary button, zoom on the wheel.
    pub fn new() -> ToolBindings {
        ToolBindings {
            primary: Tool::Rotate,
            wheel: Tool::Zoom,
        }
    }

    /// Bind `tool` to the primary button.
    ///
    /// The wheel binding is re-applied on every call even though nothing can
    /// unbind it; a transition always leaves the machine fully bound.
    /// Idempotent.
    pub fn set_active_tool(&mut self, tool: Tool) {
        self.wheel = Tool::Zoom;
        self.primary = tool;
    }

    /// Tool bound to the given gesture class.
    pub fn active(&self, gesture: Gesture) -> Tool {
        match gesture {
            Gesture::PrimaryButton => self.primary,
            Gesture::Wheel => self.wheel,
        }
    }

    pub fn is_active(&self, tool: Tool, gesture: Gesture) -> bool {
        self.active(gesture) == tool
    }
}

impl Default for ToolBindings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn initial_bindings() {
        let bindings = ToolBindings::new();

        assert_eq!(bindings.active(Gesture::PrimaryButton), Tool::Rotate);
        assert_eq!(bindings.active(Gesture::Wheel), Tool::Zoom);
    }

    #[test]
    fn exactly_one_tool_owns_primary() {
        let mut bindings = ToolBindings::new();

        for tool in [Tool::Rotate, Tool::Pan, Tool::Zoom] {
            bindings.set_active_tool(tool);

            let active: Vec<_> = [Tool::Rotate, Tool::Pan, Tool::Zoom]
                .into_iter()
                .filter(|t| bindings.is_active(*t, Gesture::PrimaryButton))
                .collect();

            assert_eq!(active, vec![tool]);
            assert!(bindings.is_active(Tool::Zoom, Gesture::Wheel));
        }
    }

    #[test]
    fn selecting_zoom_keeps_primary_bound() {
        let mut bindings = ToolBindings::new();

        bindings.set_active_tool(Tool::Zoom);

        assert_eq!(bindings.active(Gesture::PrimaryButton), Tool::Zoom);
        assert_eq!(bindings.active(Gesture::Wheel), Tool::Zoom);
    }

    #[test]
    fn transitions_are_idempotent() {
        let mut bindings = ToolBindings::new();

        bindings.set_active_tool(Tool::Pan);
        let snapshot = bindings;
        bindings.set_active_tool(Tool::Pan);

        assert_eq!(bindings, snapshot);
    }

    #[test]
    fn tool_names_parse() {
        assert_eq!("Rotate".parse::<Tool>().unwrap(), Tool::Rotate);
        assert_eq!("PAN".parse::<Tool>().unwrap(), Tool::Pan);
        assert!("orbit".parse::<Tool>().is_err());
    }
}
