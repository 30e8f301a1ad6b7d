/// MAV_CMD_NAV_GUIDED_ENABLE: hand control to an external commander.
pub const NAV_GUIDED_ENABLE: u16 = 92;

/// `param1` above this value requests enable; at or below, disable.
pub const ENABLE_THRESHOLD: f32 = 0.5;

crate::payload! {
    /// Generic command with up to seven float parameters.
    pub struct CommandLong: id = 76, crc_extra = 152 {
        pub param1: f32,
        pub param2: f32,
        pub param3: f32,
        pub param4: f32,
        pub param5: f32,
        pub param6: f32,
        pub param7: f32,
        pub command: u16,
        pub target_system: u8,
        pub target_component: u8,
        pub confirmation: u8,
    }
}

crate::payload! {
    pub struct CommandAck: id = 77, crc_extra = 143 {
        pub command: u16,
        pub result: u8,
    }
}

impl CommandLong {
    /// `Some(enabled)` if this is a guided-enable handshake.
    #[inline]
    pub fn guided_enable_state(&self) -> Option<bool> {
        (self.command == NAV_GUIDED_ENABLE).then(|| self.param1 > ENABLE_THRESHOLD)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn threshold() {
        let mut cmd = CommandLong {
            command: NAV_GUIDED_ENABLE,
            ..Default::default()
        };

        for (param1, expected) in [(1.0, true), (0.51, true), (0.5, false), (0.0, false)] {
            cmd.param1 = param1;
            assert_eq!(cmd.guided_enable_state(), Some(expected));
        }

        cmd.command = NAV_GUIDED_ENABLE + 1;
        assert_eq!(cmd.guided_enable_state(), None);
    }
}
