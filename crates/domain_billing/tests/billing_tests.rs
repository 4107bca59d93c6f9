//! Comprehensive tests for domain_billing

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use core_kernel::{BookingId, Currency, GuestId, Money, RoomId, StaffId, StayPeriod, VendorId};

use domain_billing::billing::{BillingService, InvoiceRequest, ManualEntry, PaymentRequest};
use domain_billing::booking::{BookingSnapshot, BookingSource, BookingStatus};
use domain_billing::error::BillingError;
use domain_billing::invoice::SettlementStatus;
use domain_billing::ledger::TransactionFilter;
use domain_billing::payment::PaymentMode;
use domain_billing::transaction::TransactionKind;

fn inr(amount: Decimal) -> Money {
    Money::new(amount, Currency::INR)
}

/// Fixed booking directory backing the service under test
struct FixedBookings(HashMap<BookingId, BookingSnapshot>);

impl FixedBookings {
    fn of(bookings: Vec<BookingSnapshot>) -> Self {
        Self(bookings.into_iter().map(|b| (b.booking_id, b)).collect())
    }
}

impl BookingSource for FixedBookings {
    fn booking(&self, id: BookingId) -> Option<BookingSnapshot> {
        self.0.get(&id).cloned()
    }
}

fn confirmed_booking(total: Money, nights: i64) -> BookingSnapshot {
    let check_in = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    BookingSnapshot {
        booking_id: BookingId::new_v7(),
        guest_id: GuestId::new_v7(),
        room_id: RoomId::new_v7(),
        stay: StayPeriod::new(check_in, check_in + Duration::days(nights)).unwrap(),
        total_amount: total,
        status: BookingStatus::Confirmed,
        payment_status: SettlementStatus::Pending,
    }
}

fn service_for(booking: &BookingSnapshot) -> BillingService<FixedBookings> {
    BillingService::new(FixedBookings::of(vec![booking.clone()]))
}

// ============================================================================
// Invoice building
// ============================================================================

mod invoice_builder_tests {
    use super::*;

    #[test]
    fn test_three_night_booking_with_tax() {
        let booking = confirmed_booking(inr(dec!(300)), 3);
        let mut billing = service_for(&booking);

        let invoice = billing
            .build_invoice(booking.booking_id, InvoiceRequest::new().with_tax(inr(dec!(54))))
            .unwrap();

        assert_eq!(invoice.items.len(), 1);
        let room = &invoice.items[0];
        assert_eq!(room.description, "Room Charges (3 nights)");
        assert_eq!(room.quantity, dec!(3));
        assert_eq!(room.rate, inr(dec!(100)));
        assert_eq!(room.amount, inr(dec!(300)));

        assert_eq!(invoice.subtotal, inr(dec!(300)));
        assert_eq!(invoice.tax, inr(dec!(54)));
        assert_eq!(invoice.discount, inr(dec!(0)));
        assert_eq!(invoice.total_amount, inr(dec!(354)));
        assert_eq!(invoice.paid_amount, inr(dec!(0)));
        assert_eq!(invoice.due_amount, inr(dec!(354)));
        assert_eq!(invoice.payment_status, SettlementStatus::Pending);
        assert!(invoice.payment_mode.is_none());
    }

    #[test]
    fn test_extra_items_follow_room_charges() {
        let booking = confirmed_booking(inr(dec!(1200)), 2);
        let mut billing = service_for(&booking);

        let request = InvoiceRequest::new()
            .with_item("Airport pickup", dec!(1), inr(dec!(450)))
            .with_item("Breakfast", dec!(4), inr(dec!(150)));
        let invoice = billing.build_invoice(booking.booking_id, request).unwrap();

        assert_eq!(invoice.items.len(), 3);
        assert_eq!(invoice.items[1].amount, inr(dec!(450)));
        assert_eq!(invoice.items[2].amount, inr(dec!(600)));
        assert_eq!(invoice.subtotal, inr(dec!(2250)));
        assert_eq!(invoice.total_amount, inr(dec!(2250)));
    }

    #[test]
    fn test_subtotal_matches_item_sum() {
        let booking = confirmed_booking(inr(dec!(999)), 3);
        let mut billing = service_for(&booking);

        let invoice = billing
            .build_invoice(
                booking.booking_id,
                InvoiceRequest::new().with_item("Spa", dec!(2), inr(dec!(350.50))),
            )
            .unwrap();

        let item_sum: Decimal = invoice.items.iter().map(|i| i.amount.amount()).sum();
        assert_eq!(invoice.subtotal.amount(), item_sum);
    }

    #[test]
    fn test_discount_reduces_total() {
        let booking = confirmed_booking(inr(dec!(1000)), 2);
        let mut billing = service_for(&booking);

        let invoice = billing
            .build_invoice(
                booking.booking_id,
                InvoiceRequest::new()
                    .with_tax(inr(dec!(180)))
                    .with_discount(inr(dec!(80))),
            )
            .unwrap();

        assert_eq!(invoice.total_amount, inr(dec!(1100)));
        assert_eq!(invoice.due_amount, inr(dec!(1100)));
    }

    #[test]
    fn test_excessive_discount_rejected() {
        let booking = confirmed_booking(inr(dec!(500)), 1);
        let mut billing = service_for(&booking);

        let result = billing.build_invoice(
            booking.booking_id,
            InvoiceRequest::new().with_discount(inr(dec!(600))),
        );

        assert!(matches!(result, Err(BillingError::Validation(_))));
        assert!(billing.invoices().is_empty());
    }

    #[test]
    fn test_unknown_booking_rejected() {
        let booking = confirmed_booking(inr(dec!(500)), 1);
        let mut billing = service_for(&booking);

        let result = billing.build_invoice(BookingId::new(), InvoiceRequest::new());
        assert!(matches!(result, Err(BillingError::BookingNotFound(_))));
    }

    #[test]
    fn test_second_invoice_for_same_booking_rejected() {
        let booking = confirmed_booking(inr(dec!(500)), 1);
        let mut billing = service_for(&booking);

        billing.build_invoice(booking.booking_id, InvoiceRequest::new()).unwrap();
        let result = billing.build_invoice(booking.booking_id, InvoiceRequest::new());

        assert!(matches!(result, Err(BillingError::DuplicateInvoice(_))));
        assert_eq!(billing.invoices().len(), 1);
    }

    #[test]
    fn test_invalid_extra_item_rejected() {
        let booking = confirmed_booking(inr(dec!(500)), 1);
        let mut billing = service_for(&booking);

        let result = billing.build_invoice(
            booking.booking_id,
            InvoiceRequest::new().with_item("Laundry", dec!(0), inr(dec!(100))),
        );

        assert!(matches!(result, Err(BillingError::Validation(_))));
        assert!(billing.invoices().is_empty());
    }

    #[test]
    fn test_invoice_numbers_are_sequential() {
        let first = confirmed_booking(inr(dec!(500)), 1);
        let second = confirmed_booking(inr(dec!(700)), 2);
        let mut billing =
            BillingService::new(FixedBookings::of(vec![first.clone(), second.clone()]));

        let a = billing.build_invoice(first.booking_id, InvoiceRequest::new()).unwrap();
        let b = billing.build_invoice(second.booking_id, InvoiceRequest::new()).unwrap();

        assert_ne!(a.invoice_number, b.invoice_number);
        assert!(a.invoice_number.starts_with("INV-"));
        assert!(b.invoice_number > a.invoice_number);

        let found = billing.invoices().find_by_number(&a.invoice_number).unwrap();
        assert_eq!(found.id, a.id);
    }

    #[test]
    fn test_building_creates_no_ledger_entries() {
        let booking = confirmed_booking(inr(dec!(500)), 1);
        let mut billing = service_for(&booking);

        billing.build_invoice(booking.booking_id, InvoiceRequest::new()).unwrap();
        assert!(billing.ledger().is_empty());
        assert!(billing.payments().is_empty());
    }
}

// ============================================================================
// Payment application
// ============================================================================

mod payment_tests {
    use super::*;

    fn invoiced_service() -> (BillingService<FixedBookings>, core_kernel::InvoiceId) {
        let booking = confirmed_booking(inr(dec!(300)), 3);
        let mut billing = service_for(&booking);
        let invoice = billing
            .build_invoice(booking.booking_id, InvoiceRequest::new().with_tax(inr(dec!(54))))
            .unwrap();
        (billing, invoice.id)
    }

    #[test]
    fn test_partial_then_full_settlement() {
        let (mut billing, invoice_id) = invoiced_service();

        let receipt = billing
            .apply_payment(PaymentRequest::new(inr(dec!(200)), PaymentMode::Card).for_invoice(invoice_id))
            .unwrap();
        let invoice = receipt.invoice.unwrap();
        assert_eq!(invoice.paid_amount, inr(dec!(200)));
        assert_eq!(invoice.due_amount, inr(dec!(154)));
        assert_eq!(invoice.payment_status, SettlementStatus::Partial);
        assert_eq!(invoice.payment_mode, Some(PaymentMode::Card));

        let receipt = billing
            .apply_payment(PaymentRequest::new(inr(dec!(154)), PaymentMode::Cash).for_invoice(invoice_id))
            .unwrap();
        let invoice = receipt.invoice.unwrap();
        assert_eq!(invoice.paid_amount, inr(dec!(354)));
        assert_eq!(invoice.due_amount, inr(dec!(0)));
        assert_eq!(invoice.payment_status, SettlementStatus::Paid);
        // mode stays that of the first payment
        assert_eq!(invoice.payment_mode, Some(PaymentMode::Card));
        assert!(invoice.is_settled());
    }

    #[test]
    fn test_overpayment_rejected_and_invoice_unchanged() {
        let (mut billing, invoice_id) = invoiced_service();

        billing
            .apply_payment(PaymentRequest::new(inr(dec!(200)), PaymentMode::Card).for_invoice(invoice_id))
            .unwrap();
        let before = billing.invoices().get(invoice_id).unwrap().clone();

        let result = billing
            .apply_payment(PaymentRequest::new(inr(dec!(400)), PaymentMode::Cash).for_invoice(invoice_id));
        assert!(matches!(result, Err(BillingError::AmountExceedsDue { .. })));

        let after = billing.invoices().get(invoice_id).unwrap();
        assert_eq!(after.paid_amount, before.paid_amount);
        assert_eq!(after.due_amount, before.due_amount);
        assert_eq!(after.payment_status, before.payment_status);
        assert_eq!(after.version, before.version);

        // nothing else was written either
        assert_eq!(billing.payments().len(), 1);
        assert_eq!(billing.ledger().len(), 1);
    }

    #[test]
    fn test_each_payment_creates_one_ledger_entry() {
        let (mut billing, invoice_id) = invoiced_service();

        billing
            .apply_payment(PaymentRequest::new(inr(dec!(200)), PaymentMode::Card).for_invoice(invoice_id))
            .unwrap();
        billing
            .apply_payment(PaymentRequest::new(inr(dec!(154)), PaymentMode::Cash).for_invoice(invoice_id))
            .unwrap();

        assert_eq!(billing.payments().len(), 2);
        assert_eq!(billing.ledger().len(), 2);

        for (payment, txn) in billing.payments().iter().zip(billing.ledger().iter()) {
            assert_eq!(payment.amount, txn.amount);
            assert_eq!(txn.kind, TransactionKind::Revenue);
            assert_eq!(txn.category, "Room Booking");
            assert_eq!(txn.invoice_id, Some(invoice_id));
            assert!(txn.booking_id.is_some());
        }
    }

    #[test]
    fn test_ledger_entry_describes_invoice() {
        let (mut billing, invoice_id) = invoiced_service();

        let receipt = billing
            .apply_payment(PaymentRequest::new(inr(dec!(100)), PaymentMode::Upi).for_invoice(invoice_id))
            .unwrap();

        let number = receipt.invoice.unwrap().invoice_number;
        assert_eq!(
            receipt.transaction.description.as_deref(),
            Some(format!("Payment for invoice {}", number).as_str())
        );
        // reference defaults to the invoice number
        assert_eq!(receipt.transaction.reference.as_deref(), Some(number.as_str()));
    }

    #[test]
    fn test_caller_reference_wins() {
        let (mut billing, invoice_id) = invoiced_service();

        let receipt = billing
            .apply_payment(
                PaymentRequest::new(inr(dec!(100)), PaymentMode::Upi)
                    .for_invoice(invoice_id)
                    .with_reference("UPI-99871"),
            )
            .unwrap();

        assert_eq!(receipt.payment.reference.as_deref(), Some("UPI-99871"));
        assert_eq!(receipt.transaction.reference.as_deref(), Some("UPI-99871"));
    }

    #[test]
    fn test_received_by_attached_to_both_records() {
        let (mut billing, invoice_id) = invoiced_service();
        let staff = StaffId::new();

        let receipt = billing
            .apply_payment(
                PaymentRequest::new(inr(dec!(100)), PaymentMode::Cash)
                    .for_invoice(invoice_id)
                    .with_received_by(staff),
            )
            .unwrap();

        assert_eq!(receipt.payment.received_by, Some(staff));
        assert_eq!(receipt.transaction.recorded_by, Some(staff));
    }

    #[test]
    fn test_standalone_payment() {
        let booking = confirmed_booking(inr(dec!(300)), 3);
        let mut billing = service_for(&booking);

        let receipt = billing
            .apply_payment(
                PaymentRequest::new(inr(dec!(750)), PaymentMode::Cash)
                    .with_notes("Walk-in conference hall booking"),
            )
            .unwrap();

        assert!(receipt.invoice.is_none());
        assert!(receipt.payment.invoice_id.is_none());
        assert_eq!(receipt.transaction.category, "Others");
        assert_eq!(
            receipt.transaction.description.as_deref(),
            Some("Walk-in conference hall booking")
        );
        assert_eq!(receipt.transaction.kind, TransactionKind::Revenue);
    }

    #[test]
    fn test_standalone_payment_default_description() {
        let booking = confirmed_booking(inr(dec!(300)), 3);
        let mut billing = service_for(&booking);

        let receipt = billing
            .apply_payment(PaymentRequest::new(inr(dec!(50)), PaymentMode::Cash))
            .unwrap();

        assert_eq!(receipt.transaction.description.as_deref(), Some("Direct payment received"));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let (mut billing, invoice_id) = invoiced_service();

        let result = billing
            .apply_payment(PaymentRequest::new(inr(dec!(0)), PaymentMode::Cash).for_invoice(invoice_id));
        assert!(matches!(result, Err(BillingError::Validation(_))));

        let result = billing
            .apply_payment(PaymentRequest::new(inr(dec!(-10)), PaymentMode::Cash).for_invoice(invoice_id));
        assert!(matches!(result, Err(BillingError::Validation(_))));
        assert!(billing.payments().is_empty());
    }

    #[test]
    fn test_unknown_invoice_rejected() {
        let booking = confirmed_booking(inr(dec!(300)), 3);
        let mut billing = service_for(&booking);

        let result = billing.apply_payment(
            PaymentRequest::new(inr(dec!(100)), PaymentMode::Card)
                .for_invoice(core_kernel::InvoiceId::new()),
        );

        assert!(matches!(result, Err(BillingError::InvoiceNotFound(_))));
    }

    #[test]
    fn test_seeded_overpayment_shows_negative_due() {
        // imported data may arrive already overpaid; figures are kept as-is
        let (billing, invoice_id) = invoiced_service();

        let seeded = billing
            .invoices()
            .get(invoice_id)
            .unwrap()
            .clone()
            .with_paid_amount(inr(dec!(400)))
            .unwrap();

        assert_eq!(seeded.paid_amount, inr(dec!(400)));
        assert_eq!(seeded.due_amount, inr(dec!(-46)));
        assert_eq!(seeded.payment_status, SettlementStatus::Paid);
        // the invariant holds even here
        assert_eq!(
            seeded.due_amount.amount(),
            seeded.total_amount.amount() - seeded.paid_amount.amount()
        );
    }

    #[test]
    fn test_exact_due_settles_invoice() {
        let (mut billing, invoice_id) = invoiced_service();

        let receipt = billing
            .apply_payment(PaymentRequest::new(inr(dec!(354)), PaymentMode::NetBanking).for_invoice(invoice_id))
            .unwrap();

        let invoice = receipt.invoice.unwrap();
        assert_eq!(invoice.payment_status, SettlementStatus::Paid);
        assert_eq!(invoice.due_amount, inr(dec!(0)));
    }
}

// ============================================================================
// Manual ledger entries
// ============================================================================

mod manual_entry_tests {
    use super::*;

    #[test]
    fn test_manual_expense_entry() {
        let booking = confirmed_booking(inr(dec!(300)), 3);
        let mut billing = service_for(&booking);
        let vendor = VendorId::new();
        let occurred = Utc.with_ymd_and_hms(2026, 2, 28, 0, 0, 0).unwrap();

        let id = billing
            .record_manual_entry(ManualEntry {
                kind: TransactionKind::Expense,
                category: "Salaries".to_string(),
                amount: inr(dec!(42000)),
                mode: PaymentMode::NetBanking,
                occurred_on: occurred,
                booking_id: None,
                vendor_id: Some(vendor),
                notes: Some("February payroll".to_string()),
                recorded_by: None,
            })
            .unwrap();

        let txn = billing.ledger().get(id).unwrap();
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.occurred_on, occurred);
        assert_eq!(txn.vendor_id, Some(vendor));
        assert_eq!(txn.description.as_deref(), Some("February payroll"));

        let page = billing.ledger().query(&TransactionFilter::new().for_vendor(vendor));
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_manual_entry_rejects_zero_amount() {
        let booking = confirmed_booking(inr(dec!(300)), 3);
        let mut billing = service_for(&booking);

        let result = billing.record_manual_entry(ManualEntry {
            kind: TransactionKind::Revenue,
            category: "Others".to_string(),
            amount: inr(dec!(0)),
            mode: PaymentMode::Cash,
            occurred_on: Utc::now(),
            booking_id: None,
            vendor_id: None,
            notes: None,
            recorded_by: None,
        });

        assert!(matches!(result, Err(BillingError::Validation(_))));
    }

    #[test]
    fn test_ledger_query_by_booking_link() {
        let booking = confirmed_booking(inr(dec!(300)), 3);
        let mut billing = service_for(&booking);
        let invoice = billing
            .build_invoice(booking.booking_id, InvoiceRequest::new())
            .unwrap();
        billing
            .apply_payment(PaymentRequest::new(inr(dec!(300)), PaymentMode::Card).for_invoice(invoice.id))
            .unwrap();

        let page = billing
            .ledger()
            .query(&TransactionFilter::new().for_booking(booking.booking_id));

        assert_eq!(page.total, 1);
        assert_eq!(page.transactions[0].invoice_id, Some(invoice.id));

        let page = billing
            .ledger()
            .query(&TransactionFilter::new().for_invoice(invoice.id));
        assert_eq!(page.total, 1);
    }
}

// ============================================================================
// Settlement derivation properties
// ============================================================================

mod settlement_proptests {
    use super::*;
    use domain_billing::invoice::derive_settlement;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn due_is_always_total_minus_paid(
            total in 1i64..1_000_000_000i64,
            paid in 0i64..2_000_000_000i64
        ) {
            let total = Money::from_minor(total, Currency::INR);
            let paid = Money::from_minor(paid, Currency::INR);

            let (due, _) = derive_settlement(total, paid);
            prop_assert_eq!(due.amount(), total.amount() - paid.amount());
        }

        #[test]
        fn status_classification_is_exhaustive(
            total in 1i64..1_000_000_000i64,
            paid in 0i64..2_000_000_000i64
        ) {
            let total = Money::from_minor(total, Currency::INR);
            let paid = Money::from_minor(paid, Currency::INR);

            let (_, status) = derive_settlement(total, paid);
            let expected = if paid.is_zero() {
                SettlementStatus::Pending
            } else if paid.amount() >= total.amount() {
                SettlementStatus::Paid
            } else {
                SettlementStatus::Partial
            };
            prop_assert_eq!(status, expected);
        }
    }
}
