//! Pure constructors for every message this side sends.

use crate::{
    payload::{
        command::NAV_GUIDED_ENABLE,
        setpoint::FRAME_LOCAL_NED,
        CommandLong,
        SetAttitudeTarget,
        SetPositionTargetLocalNed,
    },
    Endpoint,
};

/// Local NED target. `type_mask` bits mark ignored fields (0 = use everything).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PositionSetpoint {
    pub x:         f32,
    pub y:         f32,
    pub z:         f32,
    pub vx:        f32,
    pub vy:        f32,
    pub vz:        f32,
    pub afx:       f32,
    pub afy:       f32,
    pub afz:       f32,
    pub yaw:       f32,
    pub yaw_rate:  f32,
    pub type_mask: u16,
}

impl PositionSetpoint {
    /// Hold position `altitude` meters above the local origin (+z points down).
    #[inline]
    pub fn hover(altitude: f32) -> Self {
        Self {
            z: -altitude,
            ..Default::default()
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AttitudeSetpoint {
    pub q:               [f32; 4],
    pub body_roll_rate:  f32,
    pub body_pitch_rate: f32,
    pub body_yaw_rate:   f32,
    pub thrust:          f32,
    pub type_mask:       u8,
}

impl Default for AttitudeSetpoint {
    fn default() -> Self {
        Self {
            q:               [1., 0., 0., 0.],
            body_roll_rate:  0.,
            body_pitch_rate: 0.,
            body_yaw_rate:   0.,
            thrust:          0.,
            type_mask:       0,
        }
    }
}

/// Request (`enable`) or release externally-commanded control of `target`.
#[inline]
pub fn guided_enable(target: Endpoint, enable: bool) -> CommandLong {
    CommandLong {
        param1: if enable { 1. } else { 0. },
        command: NAV_GUIDED_ENABLE,
        target_system: target.system,
        target_component: target.component,
        ..Default::default()
    }
}

#[inline]
pub fn position_target(
    target: Endpoint,
    time_boot_ms: u32,
    sp: &PositionSetpoint,
) -> SetPositionTargetLocalNed {
    SetPositionTargetLocalNed {
        time_boot_ms,
        x: sp.x,
        y: sp.y,
        z: sp.z,
        vx: sp.vx,
        vy: sp.vy,
        vz: sp.vz,
        afx: sp.afx,
        afy: sp.afy,
        afz: sp.afz,
        yaw: sp.yaw,
        yaw_rate: sp.yaw_rate,
        type_mask: sp.type_mask,
        target_system: target.system,
        target_component: target.component,
        coordinate_frame: FRAME_LOCAL_NED,
    }
}

#[inline]
pub fn attitude_target(
    target: Endpoint,
    time_boot_ms: u32,
    sp: &AttitudeSetpoint,
) -> SetAttitudeTarget {
    SetAttitudeTarget {
        time_boot_ms,
        q: sp.q,
        body_roll_rate: sp.body_roll_rate,
        body_pitch_rate: sp.body_pitch_rate,
        body_yaw_rate: sp.body_yaw_rate,
        thrust: sp.thrust,
        target_system: target.system,
        target_component: target.component,
        type_mask: sp.type_mask,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn target() -> Endpoint {
        Endpoint::broadcast(1).unwrap()
    }

    #[test]
    fn handshake_magnitudes() {
        assert_eq!(guided_enable(target(), true).guided_enable_state(), Some(true));
        assert_eq!(guided_enable(target(), false).guided_enable_state(), Some(false));
    }

    #[test]
    fn addressing() {
        let target = Endpoint::new(3, 7).unwrap();

        let cmd = guided_enable(target, true);
        assert_eq!((cmd.target_system, cmd.target_component), (3, 7));

        let pos = position_target(target, 10, &PositionSetpoint::hover(1.));
        assert_eq!((pos.target_system, pos.target_component), (3, 7));
        assert_eq!(pos.coordinate_frame, FRAME_LOCAL_NED);
        assert_eq!(pos.z, -1.);
        assert_eq!(pos.time_boot_ms, 10);

        let att = attitude_target(target, 10, &AttitudeSetpoint::default());
        assert_eq!((att.target_system, att.target_component), (3, 7));
        assert_eq!(att.q, [1., 0., 0., 0.]);
    }
}
