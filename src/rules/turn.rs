//! Turn order: circular over the roster, skipping anyone not alive.

use crate::core::Roster;

/// Roster position of the next player to act after `current`.
///
/// Steps forward circularly and skips players whose status is not `Alive`.
/// The walk is bounded by the roster size, so a roster with nobody alive
/// still returns (some position) instead of spinning. Callers only rely on
/// the result when at least one player is alive.
///
/// ```
/// use safe_nuked::core::{PlayerStatus, Roster, AVATARS};
/// use safe_nuked::rules::advance;
///
/// let mut roster = Roster::new();
/// roster.add_player("A", AVATARS[0]);
/// let b = roster.add_player("B", AVATARS[1]).unwrap();
/// roster.add_player("C", AVATARS[2]);
/// roster.set_status(b, PlayerStatus::Eliminated);
///
/// assert_eq!(advance(0, &roster), 2);
/// assert_eq!(advance(2, &roster), 0);
/// ```
#[must_use]
pub fn advance(current: usize, roster: &Roster) -> usize {
    let len = roster.len();
    if len == 0 {
        return 0;
    }

    let mut next = (current + 1) % len;
    let mut steps = 0;
    while steps < len && !roster.at(next).is_some_and(|p| p.is_alive()) {
        next = (next + 1) % len;
        steps += 1;
    }
    next
}
