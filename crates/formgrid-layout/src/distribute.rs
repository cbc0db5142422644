//! Integer apportioning of pixels over weighted tracks.
//!
//! Grouped tracks are handled as one unit so that every member receives the
//! same amount. Units are visited groups first, single tracks last, and the
//! pixels a group cannot split evenly are carried to the next unit.

use smallvec::SmallVec;

use formgrid_core::TrackGroup;

/// One or more tracks (0-based) that change size together.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Unit {
    pub members: SmallVec<[usize; 4]>,
    pub weight: f64,
}

/// Build the units of a track list: one per group, then one per ungrouped
/// track. `weight` gives the weight of a single 0-based track; a group
/// weighs the sum of its members.
pub(crate) fn units(count: usize, groups: &[TrackGroup], weight: impl Fn(usize) -> f64) -> Vec<Unit> {
    let mut grouped = vec![false; count];
    let mut units = Vec::with_capacity(count);

    for group in groups {
        let members: SmallVec<[usize; 4]> = group
            .members()
            .iter()
            .map(|index| index - 1)
            .filter(|&i| i < count)
            .collect();
        if members.is_empty() {
            continue;
        }
        for &i in &members {
            grouped[i] = true;
        }
        let weight = members.iter().map(|&i| weight(i)).sum();
        units.push(Unit { members, weight });
    }

    for (i, _) in grouped.iter().enumerate().filter(|(_, grouped)| !**grouped) {
        units.push(Unit {
            members: SmallVec::from_slice(&[i]),
            weight: weight(i),
        });
    }
    units
}

/// Split `amount` over `weights` proportionally, rounding the running total
/// so that the shares add up to `amount` exactly.
pub(crate) fn apportion(amount: i32, weights: &[f64]) -> Vec<i32> {
    let total: f64 = weights.iter().sum();
    if amount == 0 || total <= 0.0 {
        return vec![0; weights.len()];
    }

    let mut shares = Vec::with_capacity(weights.len());
    let mut running = 0.0;
    let mut given = 0;
    for (i, weight) in weights.iter().enumerate() {
        running += weight;
        let target = if i + 1 == weights.len() {
            amount
        } else {
            (f64::from(amount) * running / total).round() as i32
        };
        shares.push(target - given);
        given = target;
    }
    shares
}

/// Add `amount` to the tracks in `sizes`, weighted per unit.
///
/// `limit` caps what a single track may receive; pixels beyond the cap are
/// carried to later units. Returns the pixels that could not be placed.
pub(crate) fn spread(sizes: &mut [i32], units: &[Unit], amount: i32, limit: impl Fn(usize) -> i32) -> i32 {
    let weights: Vec<f64> = units.iter().map(|u| u.weight).collect();
    let shares = apportion(amount, &weights);

    let mut carry = 0;
    for (unit, share) in units.iter().zip(shares) {
        if unit.weight <= 0.0 {
            continue;
        }
        let available = share.saturating_add(carry);
        let count = unit.members.len() as i32;
        let cap = unit.members.iter().map(|&i| limit(i)).min().unwrap_or(0);
        let each = (available / count).min(cap).max(0);
        for &i in &unit.members {
            sizes[i] = sizes[i].saturating_add(each);
        }
        carry = available - each * count;
    }
    carry
}

/// Hand out the carry of [`spread`] to units that can still take a whole
/// pixel per member, in unit order. Units without weight are skipped.
///
/// Returns what is still left.
pub(crate) fn settle(sizes: &mut [i32], units: &[Unit], mut amount: i32, limit: impl Fn(usize) -> i32) -> i32 {
    for unit in units.iter().filter(|u| u.weight > 0.0) {
        if amount <= 0 {
            break;
        }
        let count = unit.members.len() as i32;
        let room = unit.members.iter().map(|&i| limit(i) - sizes[i]).min().unwrap_or(0);
        let each = (amount / count).min(room).max(0);
        for &i in &unit.members {
            sizes[i] += each;
        }
        amount -= each * count;
    }
    amount
}
