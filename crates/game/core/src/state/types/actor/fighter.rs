/// Combat statistics.
///
/// `hp` may drop below zero; the death pass treats anything `<= 0` as dead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    pub hp: i32,
    pub max_hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Fighter {
    /// Creates a fighter at full health.
    pub const fn new(max_hp: i32, defense: i32, power: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            defense,
            power,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn is_full_health(&self) -> bool {
        self.hp >= self.max_hp
    }

    /// Restores up to `amount` hp without exceeding `max_hp`.
    ///
    /// Returns the hp actually recovered.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.is_full_health() || amount <= 0 {
            return 0;
        }
        let recovered = amount.min(self.max_hp - self.hp);
        self.hp += recovered;
        recovered
    }

    pub fn take_damage(&mut self, amount: i32) {
        if amount > 0 {
            self.hp -= amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heal_is_capped_at_max_hp() {
        let mut fighter = Fighter::new(30, 2, 5);
        fighter.take_damage(3);
        assert_eq!(fighter.heal(4), 3);
        assert_eq!(fighter.hp, 30);
        assert_eq!(fighter.heal(4), 0);
    }

    #[test]
    fn hp_can_go_negative() {
        let mut fighter = Fighter::new(1, 0, 0);
        fighter.take_damage(3);
        assert_eq!(fighter.hp, -2);
        assert!(fighter.is_dead());
    }

    #[test]
    fn negative_damage_is_ignored() {
        let mut fighter = Fighter::new(10, 0, 0);
        fighter.take_damage(-4);
        assert_eq!(fighter.hp, 10);
    }
}
