use crate::Chips;

/// Per-street bet sizing regime. `Fixed` pins the raise increment
/// (limit games); `Pot` caps a raise at the pot after calling; `NoLimit`
/// caps it at the bettor's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaiseSize {
    Fixed(Chips),
    Pot,
    NoLimit,
}

/// Per-street cap on the number of full raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaiseCap {
    Fixed(u32),
    Unlimited,
}

impl RaiseCap {
    pub fn allows(&self, street_raises: u32) -> bool {
        match self {
            RaiseCap::Fixed(cap) => street_raises < *cap,
            RaiseCap::Unlimited => true,
        }
    }
}

/// A configuration value handed out either flat to every seat/street or
/// itemized per seat/street. Itemized lists must match the expected
/// length exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule<T> {
    Flat(T),
    PerSeat(Vec<T>),
}

impl<T: Copy> Schedule<T> {
    pub fn expand(&self, what: &'static str, expected: usize) -> Result<Vec<T>, crate::Error> {
        match self {
            Schedule::Flat(value) => Ok(vec![*value; expected]),
            Schedule::PerSeat(values) if values.len() == expected => Ok(values.clone()),
            Schedule::PerSeat(values) => Err(crate::Error::InvalidConfig {
                what,
                expected,
                got: values.len(),
            }),
        }
    }
}

impl<T> From<T> for Schedule<T> {
    fn from(value: T) -> Self {
        Schedule::Flat(value)
    }
}

impl<T> From<Vec<T>> for Schedule<T> {
    fn from(values: Vec<T>) -> Self {
        Schedule::PerSeat(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_expands_to_length() {
        let schedule = Schedule::Flat(2);
        assert_eq!(schedule.expand("blind", 4).unwrap(), vec![2, 2, 2, 2]);
    }

    #[test]
    fn itemized_must_match() {
        let schedule: Schedule<i32> = Schedule::from(vec![1, 2]);
        assert_eq!(schedule.expand("blind", 2).unwrap(), vec![1, 2]);
        assert!(matches!(
            schedule.expand("blind", 6),
            Err(crate::Error::InvalidConfig {
                what: "blind",
                expected: 6,
                got: 2,
            })
        ));
    }

    #[test]
    fn caps() {
        assert!(RaiseCap::Unlimited.allows(u32::MAX));
        assert!(RaiseCap::Fixed(2).allows(1));
        assert!(!RaiseCap::Fixed(2).allows(2));
    }
}
