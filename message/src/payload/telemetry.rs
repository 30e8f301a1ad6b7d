crate::payload! {
    /// Presence beacon; carries vehicle type and mode.
    pub struct Heartbeat: id = 0, crc_extra = 50 {
        pub custom_mode: u32,
        pub mav_type: u8,
        pub autopilot: u8,
        pub base_mode: u8,
        pub system_status: u8,
        pub mavlink_version: u8,
    }
}

crate::payload! {
    /// Euler attitude in radians, rates in rad/s.
    pub struct Attitude: id = 30, crc_extra = 39 {
        pub time_boot_ms: u32,
        pub roll: f32,
        pub pitch: f32,
        pub yaw: f32,
        pub rollspeed: f32,
        pub pitchspeed: f32,
        pub yawspeed: f32,
    }
}

crate::payload! {
    pub struct LocalPositionNed: id = 32, crc_extra = 185 {
        pub time_boot_ms: u32,
        pub x: f32,
        pub y: f32,
        pub z: f32,
        pub vx: f32,
        pub vy: f32,
        pub vz: f32,
    }
}

crate::payload! {
    /// Raw IMU readings in SI units, NED body frame.
    pub struct HighresImu: id = 105, crc_extra = 93 {
        pub time_usec: u64,
        pub xacc: f32,
        pub yacc: f32,
        pub zacc: f32,
        pub xgyro: f32,
        pub ygyro: f32,
        pub zgyro: f32,
        pub xmag: f32,
        pub ymag: f32,
        pub zmag: f32,
        /// mbar
        pub abs_pressure: f32,
        pub diff_pressure: f32,
        pub pressure_alt: f32,
        /// degrees C
        pub temperature: f32,
        pub fields_updated: u16,
    }
}

impl HighresImu {
    #[inline]
    pub fn display(&self) -> String {
        let &HighresImu {
            time_usec,
            xacc,
            yacc,
            zacc,
            xgyro,
            ygyro,
            zgyro,
            xmag,
            ymag,
            zmag,
            abs_pressure,
            pressure_alt,
            temperature,
            ..
        } = self;

        format!(
            "time: {time_usec}us, acc: ({xacc:.3}, {yacc:.3}, {zacc:.3}) m/s^2, gyro: ({xgyro:.3}, {ygyro:.3}, {zgyro:.3}) rad/s, mag: ({xmag:.3}, {ymag:.3}, {zmag:.3}) Ga, baro: {abs_pressure:.2} mbar, alt: {pressure_alt:.2} m, temp: {temperature:.1} C"
        )
    }
}
