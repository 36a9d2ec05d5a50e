use super::PointerType;
use super::candidate::Side;

/// Order in which the four sides are considered.
///
/// The first two entries form the block-direction pair: vertical for
/// horizontal text, horizontal for vertical text. Touch input prefers the
/// popup above the contact point so it doesn't end up under the finger.
pub fn preference_order(is_vertical_text: bool, pointer_type: PointerType) -> [Side; 4] {
    let [first, second] = match pointer_type {
        PointerType::Cursor => [Side::Below, Side::Above],
        PointerType::Puck => [Side::Above, Side::Below],
    };
    if is_vertical_text {
        [Side::Right, Side::Left, first, second]
    } else {
        [first, second, Side::Right, Side::Left]
    }
}
