//! Scripted player input for headless runs.

use std::{collections::BTreeMap, str::FromStr};

use bastion_core::Vec2;

/// Player action injected between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Order {
    /// Fire a projectile toward the given arena point.
    Fire(Vec2),
    /// Spawn an enemy immediately.
    Spawn,
}

/// `--fire TICK:X,Y` argument.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FireOrder {
    tick: u64,
    target: Vec2,
}

impl FromStr for FireOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (tick, target) = value
            .split_once(':')
            .ok_or_else(|| format!("expected TICK:X,Y, got `{value}`"))?;
        let (x, y) = target
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y after the tick, got `{target}`"))?;

        let tick = tick
            .trim()
            .parse::<u64>()
            .map_err(|error| format!("invalid tick `{tick}`: {error}"))?;
        let x = parse_coordinate(x)?;
        let y = parse_coordinate(y)?;

        Ok(Self {
            tick,
            target: Vec2::new(x, y),
        })
    }
}

fn parse_coordinate(text: &str) -> Result<f32, String> {
    let value = text
        .trim()
        .parse::<f32>()
        .map_err(|error| format!("invalid coordinate `{text}`: {error}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("coordinate `{text}` is not finite"))
    }
}

/// Orders keyed by the number of ticks that must have run before they apply.
#[derive(Debug, Default)]
pub(crate) struct Script {
    orders: BTreeMap<u64, Vec<Order>>,
}

impl Script {
    pub(crate) fn new(fires: &[FireOrder], spawns: &[u64]) -> Self {
        let mut script = Self::default();
        for &tick in spawns {
            script.orders.entry(tick).or_default().push(Order::Spawn);
        }
        for fire in fires {
            script
                .orders
                .entry(fire.tick)
                .or_default()
                .push(Order::Fire(fire.target));
        }
        script
    }

    /// Orders to apply once `tick` ticks have run.
    pub(crate) fn orders_at(&self, tick: u64) -> &[Order] {
        self.orders.get(&tick).map_or(&[], Vec::as_slice)
    }

    /// Orders scheduled at or after `ticks`, which a run of that length never reaches.
    pub(crate) fn unreached(&self, ticks: u64) -> usize {
        self.orders
            .range(ticks..)
            .map(|(_, orders)| orders.len())
            .sum()
    }
}
