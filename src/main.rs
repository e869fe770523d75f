use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use tabletop_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::{LogDispatcher, SupabaseAuthClient},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    schema::{Services, build_schema},
    services::*,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 身份服务与令牌校验
    let jwt_service = JwtService::new(&config.identity.jwt_secret);
    let identity = Arc::new(
        SupabaseAuthClient::new(config.identity.clone())
            .expect("Failed to create identity provider client"),
    );

    // 创建服务
    let signup_service = SignupService::new(
        Arc::new(SeaOrmSignupStore::new(pool.clone())),
        identity.clone(),
        Arc::new(LogDispatcher),
        config.signup.verification_code_ttl_hours,
    );

    let schema = build_schema(Services {
        restaurants: RestaurantService::new(pool.clone()),
        tables: TableService::new(pool.clone()),
        menu: MenuService::new(pool.clone()),
        orders: OrderService::new(pool.clone()),
        invoices: InvoiceService::new(pool.clone()),
        team: TeamService::new(pool.clone()),
        auth: AuthService::new(identity),
        signup: signup_service,
    });

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(schema.clone()))
            .app_data(web::Data::new(pool.clone()))
            .configure(handlers::graphql_config)
            .configure(handlers::health_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
