use crate::error::{AppError, Result};

/// The hard per-booking ticket ceiling, independent of capacity.
pub const MAX_TICKETS_PER_BOOKING: i64 = 10;

/// Validates a requested seat quantity against the seats still available.
///
/// The permitted range is `1 ..= min(10, available_seats)`.
///
/// # Arguments
///
/// * `quantity` - The number of seats requested.
/// * `available_seats` - The seats the event still has open.
///
/// # Returns
///
/// A `Result<()>` indicating whether the quantity is bookable.
pub fn validate_quantity(quantity: i64, available_seats: i64) -> Result<()> {
    if quantity < 1 {
        return Err(AppError::Validation(
            "At least one ticket must be booked".to_string(),
        ));
    }

    let max = MAX_TICKETS_PER_BOOKING.min(available_seats);
    if quantity > max {
        return Err(AppError::Validation(format!(
            "At most {} tickets can be booked for this event",
            max
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_full_permitted_range() {
        for q in 1..=10 {
            assert!(validate_quantity(q, 50).is_ok());
        }
    }

    #[test]
    fn rejects_zero_and_negative_quantities() {
        assert!(validate_quantity(0, 50).is_err());
        assert!(validate_quantity(-3, 50).is_err());
    }

    #[test]
    fn ceiling_is_ten_even_with_large_capacity() {
        assert!(validate_quantity(11, 500).is_err());
    }

    #[test]
    fn capacity_caps_below_the_ceiling() {
        assert!(validate_quantity(4, 3).is_err());
        assert!(validate_quantity(3, 3).is_ok());
    }
}
