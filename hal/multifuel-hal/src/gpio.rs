//! GPIO pin abstractions
//!
//! Output pins drive the character LCD's parallel bus; input pins read the
//! front-panel buttons and encoder phases.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Input pin whose active level is low
///
/// Front-panel buttons pull to ground when pressed.
pub struct ActiveLow<P>(pub P);

impl<P: InputPin> ActiveLow<P> {
    /// Check if the button is held down
    pub fn is_active(&self) -> bool {
        self.0.is_low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Level(bool);

    impl InputPin for Level {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_active_low() {
        assert!(ActiveLow(Level(false)).is_active());
        assert!(!ActiveLow(Level(true)).is_active());
    }
}
