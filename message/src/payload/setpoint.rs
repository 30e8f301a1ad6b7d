/// MAV_FRAME_LOCAL_NED
pub const FRAME_LOCAL_NED: u8 = 1;

crate::payload! {
    /// Position, velocity and acceleration target in a local frame.
    /// Bits set in `type_mask` mark fields the receiver should ignore.
    pub struct SetPositionTargetLocalNed: id = 84, crc_extra = 143 {
        pub time_boot_ms: u32,
        pub x: f32,
        pub y: f32,
        pub z: f32,
        pub vx: f32,
        pub vy: f32,
        pub vz: f32,
        pub afx: f32,
        pub afy: f32,
        pub afz: f32,
        pub yaw: f32,
        pub yaw_rate: f32,
        pub type_mask: u16,
        pub target_system: u8,
        pub target_component: u8,
        pub coordinate_frame: u8,
    }
}

crate::payload! {
    pub struct SetAttitudeTarget: id = 82, crc_extra = 49 {
        pub time_boot_ms: u32,
        /// w, x, y, z
        pub q: [f32; 4],
        pub body_roll_rate: f32,
        pub body_pitch_rate: f32,
        pub body_yaw_rate: f32,
        /// 0..1
        pub thrust: f32,
        pub target_system: u8,
        pub target_component: u8,
        pub type_mask: u8,
    }
}
