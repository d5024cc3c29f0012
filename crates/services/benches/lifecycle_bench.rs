use common::EntityId;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Address, Order, Role, User};
use repositories::{InMemoryOrdersRepository, InMemoryUsersRepository, UsersRepository};
use services::{CreateOrder, MarkOrderAsDelivered, OrderService, PickUpOrder};

fn address() -> Address {
    Address::new("Rua das Flores", "123", "Centro", "Sao Paulo", "SP", "01000-000")
}

fn seeded_service(
    rt: &tokio::runtime::Runtime,
) -> OrderService<InMemoryOrdersRepository, InMemoryUsersRepository> {
    let users = InMemoryUsersRepository::new();
    rt.block_on(async {
        users
            .create(User::new("Admin", "11111111111", "pw", Role::Admin).with_id("admin-1"))
            .await
            .unwrap();
        users
            .create(
                User::new("John", "22222222222", "pw", Role::Deliveryman)
                    .with_id("deliveryman-1"),
            )
            .await
            .unwrap();
    });
    OrderService::new(InMemoryOrdersRepository::new(), users)
}

fn bench_create_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = seeded_service(&rt);

    c.bench_function("services/create_order", |b| {
        b.iter(|| {
            rt.block_on(async {
                service
                    .create_order(CreateOrder::new("admin-1", "recipient-1", address()))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_full_lifecycle(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("services/create_pick_up_deliver", |b| {
        b.iter(|| {
            let service = seeded_service(&rt);
            rt.block_on(async {
                let order = service
                    .create_order(CreateOrder::new("admin-1", "recipient-1", address()))
                    .await
                    .unwrap();
                service
                    .pick_up(PickUpOrder::new("deliveryman-1", order.id().clone()))
                    .await
                    .unwrap();
                service
                    .mark_delivered(MarkOrderAsDelivered::new(
                        "deliveryman-1",
                        order.id().clone(),
                        ["p1", "p2"],
                    ))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_entity_transitions(c: &mut Criterion) {
    let deliveryman = EntityId::from("deliveryman-1");
    let photos = vec![EntityId::from("p1"), EntityId::from("p2")];

    c.bench_function("domain/pick_up_and_deliver", |b| {
        b.iter(|| {
            let mut order = Order::new(EntityId::from("recipient-1"), address());
            order.pick_up(&deliveryman).unwrap();
            order.mark_delivered(&deliveryman, &photos).unwrap();
            order
        });
    });
}

criterion_group!(
    benches,
    bench_create_order,
    bench_full_lifecycle,
    bench_entity_transitions
);
criterion_main!(benches);
