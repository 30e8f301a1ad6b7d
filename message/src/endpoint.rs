use std::fmt::{
    Display,
    Formatter,
};

/// Component id addressing every component on the target system.
pub const COMPONENT_ALL: u8 = 0;

pub const MAX_SYSTEM_ID: u8 = 127;

/// Sender or recipient address on the logical bus shared by one serial link.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub system:    u8,
    pub component: u8,
}

impl Endpoint {
    pub fn new(system: u8, component: u8) -> Result<Self, crate::Error> {
        if system > MAX_SYSTEM_ID {
            return Err(crate::Error::SystemId(system));
        }

        Ok(Self {
            system,
            component,
        })
    }

    /// All components of `system`.
    #[inline]
    pub fn broadcast(system: u8) -> Result<Self, crate::Error> {
        Self::new(system, COMPONENT_ALL)
    }

    #[inline]
    pub fn is_broadcast(&self) -> bool {
        self.component == COMPONENT_ALL
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_broadcast() {
            write!(f, "{}/*", self.system)
        } else {
            write!(f, "{}/{}", self.system, self.component)
        }
    }
}
