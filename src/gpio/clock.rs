use core::convert::Infallible;

/// Gate for the clock source the bit-bang timing is calibrated against.
///
/// The driver enables it right before a burst and disables it right after.
pub trait ClockGate {
    type Error;

    fn enable(&mut self) -> Result<(), Self::Error>;

    fn disable(&mut self) -> Result<(), Self::Error>;
}

/// Clock that is never gated, for cores that always run from a fixed source.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOn;

impl ClockGate for AlwaysOn {
    type Error = Infallible;

    fn enable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
