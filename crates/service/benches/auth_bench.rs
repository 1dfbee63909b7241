use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::repository::mock::InMemoryUserStore;
use service::auth::tokens::mock::InMemoryRefreshTokenStore;
use service::auth::tokens::{JwtTokenIssuer, TokenConfig};
use service::auth::AuthService;

fn bench_auth(c: &mut Criterion) {
    let cfg = TokenConfig { secret: "bench-secret".into(), access_ttl_secs: 900, refresh_ttl_secs: 86_400 };
    let issuer = Arc::new(JwtTokenIssuer::new(cfg, Arc::new(InMemoryRefreshTokenStore::default())));
    let svc = AuthService::new(Arc::new(InMemoryUserStore::default()), issuer);

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register(RegisterInput {
        email: "bench@example.com".into(),
        username: "bench".into(),
        password: "Benchmark1!".into(),
    }));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt
                .block_on(svc.login(LoginInput {
                    identifier: "bench@example.com".into(),
                    password: "Benchmark1!".into(),
                }))
                .unwrap();
        });
    });

    // each rotation consumes the presented token, so thread the fresh one through
    let mut refresh = rt
        .block_on(svc.login(LoginInput {
            identifier: "bench@example.com".into(),
            password: "Benchmark1!".into(),
        }))
        .unwrap()
        .refresh;
    c.bench_function("auth_refresh_rotate", |b| {
        b.iter(|| {
            let pair = rt.block_on(svc.refresh(&refresh)).unwrap();
            refresh = pair.refresh;
        });
    });
}

criterion_group!(benches, bench_auth);
criterion_main!(benches);
