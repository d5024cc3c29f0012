//! Integration tests for the order state machine.
//!
//! These walk orders through every transition using only the public API and
//! check the table of allowed moves.

use common::EntityId;
use domain::{Address, Order, OrderError, OrderStatus, Role, User};

fn address() -> Address {
    Address::new("Rua das Flores", "123", "Centro", "Sao Paulo", "SP", "01000-000")
}

fn new_order() -> Order {
    Order::new(EntityId::from("recipient-1"), address())
}

fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

/// Builds an order sitting in `status`, assigned to deliveryman-1 when needed.
fn order_in(status: OrderStatus) -> Order {
    let mut order = new_order();
    let deliveryman = id("deliveryman-1");
    match status {
        OrderStatus::Pending => {}
        OrderStatus::PickedUp => order.pick_up(&deliveryman).unwrap(),
        OrderStatus::Delivered => {
            order.pick_up(&deliveryman).unwrap();
            order.mark_delivered(&deliveryman, &[id("p1")]).unwrap();
        }
        OrderStatus::Returned => {
            order.pick_up(&deliveryman).unwrap();
            let admin = User::new("Admin", "11111111111", "pw", Role::Admin);
            order.mark_returned(&admin).unwrap();
        }
    }
    order
}

const ALL: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::PickedUp,
    OrderStatus::Delivered,
    OrderStatus::Returned,
];

mod transition_table {
    use super::*;

    #[test]
    fn pick_up_only_from_pending() {
        for status in ALL {
            let mut order = order_in(status);
            let result = order.pick_up(&id("deliveryman-2"));
            assert_eq!(result.is_ok(), status == OrderStatus::Pending, "from {status}");
        }
    }

    #[test]
    fn deliver_only_from_picked_up() {
        for status in ALL {
            if status == OrderStatus::Pending {
                continue;
            }
            let mut order = order_in(status);
            let result = order.mark_delivered(&id("deliveryman-1"), &[id("p9")]);
            assert_eq!(result.is_ok(), status == OrderStatus::PickedUp, "from {status}");
        }
    }

    #[test]
    fn return_and_reset_from_any_status() {
        let admin = User::new("Admin", "11111111111", "pw", Role::Admin);
        for status in ALL {
            let mut order = order_in(status);
            order.mark_returned(&admin).unwrap();
            assert_eq!(order.status(), OrderStatus::Returned);

            let mut order = order_in(status);
            order.reset_to_pending().unwrap();
            assert_eq!(order.status(), OrderStatus::Pending);
            assert!(order.deliveryman_id().is_none());
        }
    }

    #[test]
    fn failed_transitions_leave_order_unchanged() {
        for status in [OrderStatus::Delivered, OrderStatus::Returned] {
            let before = order_in(status);
            let mut order = before.clone();

            let err = order.pick_up(&id("deliveryman-2")).unwrap_err();

            assert!(matches!(
                err,
                OrderError::InvalidStateTransition { current_state, .. } if current_state == status
            ));
            assert_eq!(order, before);
        }
    }
}

mod delivery {
    use super::*;

    #[test]
    fn attachments_follow_photo_ids() {
        let mut order = order_in(OrderStatus::PickedUp);

        let attachments = order
            .mark_delivered(&id("deliveryman-1"), &[id("p1"), id("p2")])
            .unwrap();

        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].attachment_id(), &id("p1"));
        assert_eq!(attachments[1].attachment_id(), &id("p2"));
        assert_ne!(attachments[0].id(), attachments[1].id());
    }

    #[test]
    fn error_messages_name_the_action() {
        let mut order = order_in(OrderStatus::PickedUp);

        let not_assigned = order
            .mark_delivered(&id("deliveryman-2"), &[id("p1")])
            .unwrap_err();
        assert_eq!(
            not_assigned.to_string(),
            "Only the assigned deliveryman can mark the order as delivered"
        );

        let no_photo = order.mark_delivered(&id("deliveryman-1"), &[]).unwrap_err();
        assert_eq!(no_photo.to_string(), "At least one delivery photo is required");

        let invalid = order.pick_up(&id("deliveryman-1")).unwrap_err();
        assert_eq!(
            invalid.to_string(),
            "Invalid state transition: cannot pick up from picked_up state"
        );
    }

    #[test]
    fn order_serializes_with_snake_case_status() {
        let order = order_in(OrderStatus::PickedUp);

        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["status"], "picked_up");
        assert_eq!(json["deliveryman_id"], "deliveryman-1");
        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }
}
