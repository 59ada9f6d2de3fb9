// Sherman Encoders
// Rotary encoder bindings per layer

use crate::action::KeyAction;
use crate::layer::{Layer, LAYER_COUNT};

pub const NUM_ENCODERS: usize = 4;

/// Actions for one encoder on one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderBinding {
    pub ccw: KeyAction,
    pub cw: KeyAction,
}

const fn ccw_cw(ccw: KeyAction, cw: KeyAction) -> EncoderBinding {
    EncoderBinding { ccw, cw }
}

const UNUSED: EncoderBinding = ccw_cw(KeyAction::No, KeyAction::No);

/// Only the fourth encoder is fitted
const fn fourth(ccw: KeyAction, cw: KeyAction) -> [EncoderBinding; NUM_ENCODERS] {
    [UNUSED, UNUSED, UNUSED, ccw_cw(ccw, cw)]
}

/// Encoder map indexed by [`Layer::index`]
pub const ENCODER_MAP: [[EncoderBinding; NUM_ENCODERS]; LAYER_COUNT] = [
    fourth(kc!(Up), kc!(Down)),
    fourth(kc!(Up), kc!(Down)),
    fourth(kc!(Pgdn), kc!(Pgup)),
    fourth(kc!(Up), kc!(Down)),
    fourth(kc!(Up), kc!(Down)),
    fourth(kc!(Up), kc!(Down)),
    fourth(kc!(Vold), kc!(Volu)),
    fourth(kc!(MsWhlu), kc!(MsWhld)),
    fourth(kc!(RmVald), kc!(RmValu)),
    fourth(kc!(Brid), kc!(Briu)),
];

pub fn encoder_binding(layer: Layer, index: usize) -> Option<EncoderBinding> {
    ENCODER_MAP[layer.index() as usize].get(index).copied()
}

/// Action for a turn of encoder `index`; `No` when out of range
pub fn encoder_action(layer: Layer, index: usize, clockwise: bool) -> KeyAction {
    match encoder_binding(layer, index) {
        Some(binding) if clockwise => binding.cw,
        Some(binding) => binding.ccw,
        None => KeyAction::No,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourth_encoder_per_layer() {
        assert_eq!(encoder_action(Layer::Base, 3, false), kc!(Up));
        assert_eq!(encoder_action(Layer::Base, 3, true), kc!(Down));
        assert_eq!(encoder_action(Layer::Nav, 3, true), kc!(Pgup));
        assert_eq!(encoder_action(Layer::Media, 3, true), kc!(Volu));
        assert_eq!(encoder_action(Layer::Mouse, 3, false), kc!(MsWhlu));
        assert_eq!(encoder_action(Layer::Rgb, 3, true), kc!(RmValu));
        assert_eq!(encoder_action(Layer::Key, 3, false), kc!(Brid));
    }

    #[test]
    fn test_unused_and_out_of_range() {
        for layer in Layer::all() {
            for index in 0..3 {
                assert_eq!(encoder_action(*layer, index, true), KeyAction::No);
                assert_eq!(encoder_action(*layer, index, false), KeyAction::No);
            }
        }
        assert_eq!(encoder_action(Layer::Base, NUM_ENCODERS, true), KeyAction::No);
        assert_eq!(encoder_binding(Layer::Base, 9), None);
    }
}
