use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use backoffice_auth::{is_authorized, Role, RoleSet};
use backoffice_nav::{filter_menu, main_menu};

/// The filter runs on every render pass, so it should stay flat and cheap
/// across role shapes.
fn bench_filter_menu(c: &mut Criterion) {
    let menu = main_menu();
    let mut group = c.benchmark_group("filter_menu");

    for role in Role::ALL {
        let roles: RoleSet = [role].into_iter().collect();
        group.bench_with_input(BenchmarkId::from_parameter(role), &roles, |b, roles| {
            b.iter(|| filter_menu(black_box(&menu), black_box(roles)));
        });
    }

    let empty = RoleSet::new();
    group.bench_with_input(BenchmarkId::from_parameter("none"), &empty, |b, roles| {
        b.iter(|| filter_menu(black_box(&menu), black_box(roles)));
    });

    group.finish();
}

fn bench_is_authorized(c: &mut Criterion) {
    let user: RoleSet = [Role::OperationsTeam2, Role::Marketing].into_iter().collect();
    let required = [Role::Admin, Role::Marketing];

    c.bench_function("is_authorized", |b| {
        b.iter(|| is_authorized(black_box(&user), black_box(&required)));
    });
}

criterion_group!(benches, bench_filter_menu, bench_is_authorized);
criterion_main!(benches);
