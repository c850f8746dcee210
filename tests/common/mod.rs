//! Shared fixture: a small application model with API routes, controllers,
//! request classes, resources, and a model, mirroring a typical CRUD app.

#![allow(dead_code)]

use std::collections::BTreeMap;

use routemap::reflect::{
    AuthorizeHook, ClassInfo, MethodInfo, ParamInfo, TypeExpr, TypeFamily, TypeRegistry, Visibility,
};
use routemap::routes::{HandlerRef, RegisteredRoute, RouteRegistry};
use routemap::rules::{RawRule, RawRuleSet};
use routemap::server::AppContext;

pub const USER_CONTROLLER: &str = "App\\Http\\Controllers\\UserController";
pub const STORE_USER_REQUEST: &str = "App\\Http\\Requests\\StoreUserRequest";
pub const DENY_REQUEST: &str = "App\\Http\\Requests\\DeleteUserRequest";
pub const FORM_REQUEST_BASE: &str = "Illuminate\\Foundation\\Http\\FormRequest";

pub fn fixture_context() -> AppContext {
    AppContext::new(fixture_routes(), fixture_types())
}

pub fn fixture_routes() -> RouteRegistry {
    RouteRegistry::new(vec![
        route("/", &["GET", "HEAD"], Some("home"), &["web"], HandlerRef::Closure),
        route(
            "api/users",
            &["GET", "HEAD"],
            Some("users.index"),
            &["api"],
            HandlerRef::controller(USER_CONTROLLER, "index"),
        ),
        route(
            "api/users",
            &["POST"],
            Some("users.store"),
            &["api"],
            HandlerRef::controller(USER_CONTROLLER, "store"),
        ),
        with_wheres(
            route(
                "api/users/{user}",
                &["GET", "HEAD"],
                Some("users.show"),
                &["api"],
                HandlerRef::controller(USER_CONTROLLER, "show"),
            ),
            "user",
            "[0-9]+",
        ),
        route(
            "sanctum/csrf-cookie",
            &["GET", "HEAD"],
            None,
            &["web"],
            HandlerRef::controller(
                "Laravel\\Sanctum\\Http\\Controllers\\CsrfCookieController",
                "show",
            ),
        ),
        with_domain(
            route("admin/stats", &["GET"], Some("admin.stats"), &["web"], HandlerRef::Closure),
            "admin.example.com",
        ),
    ])
}

pub fn fixture_types() -> TypeRegistry {
    let mut types = TypeRegistry::new();

    types.add_family_base(TypeFamily::Request, FORM_REQUEST_BASE);
    types.add_family_base(
        TypeFamily::Resource,
        "Illuminate\\Http\\Resources\\Json\\JsonResource",
    );
    types.add_family_base(
        TypeFamily::Resource,
        "Illuminate\\Http\\Resources\\Json\\ResourceCollection",
    );
    types.add_family_base(TypeFamily::Model, "Illuminate\\Database\\Eloquent\\Model");

    types.register(
        ClassInfo::new(USER_CONTROLLER)
            .in_file("app/Http/Controllers/UserController.php")
            .with_method(
                MethodInfo::new("index")
                    .returning(TypeExpr::class("App\\Http\\Resources\\UserCollection"))
                    .at_lines(14, 18),
            )
            .with_method(
                MethodInfo::new("store")
                    .with_param(ParamInfo::new(
                        "request",
                        Some(TypeExpr::class(STORE_USER_REQUEST)),
                    ))
                    .returning(TypeExpr::class("App\\Http\\Resources\\UserResource"))
                    .at_lines(20, 27),
            )
            .with_method(
                MethodInfo::new("show")
                    .with_param(ParamInfo::new("user", Some(TypeExpr::class("App\\Models\\User"))))
                    .returning(TypeExpr::class("App\\Http\\Resources\\UserResource"))
                    .at_lines(29, 33),
            )
            .with_method(
                MethodInfo::new("formatTrace")
                    .visibility(Visibility::Protected)
                    .at_lines(35, 40),
            ),
    );

    let mut store_rules = BTreeMap::new();
    store_rules.insert(
        "name".to_string(),
        RawRuleSet::Joined("required|string|max:255".to_string()),
    );
    store_rules.insert(
        "email".to_string(),
        RawRuleSet::List(vec![
            RawRule::text("required"),
            RawRule::text("email"),
            RawRule::text("unique:users,email"),
        ]),
    );
    store_rules.insert(
        "role".to_string(),
        RawRuleSet::Joined("in:admin,editor,viewer".to_string()),
    );

    let mut store_request = ClassInfo::new(STORE_USER_REQUEST)
        .in_file("app/Http/Requests/StoreUserRequest.php")
        .extending(FORM_REQUEST_BASE);
    store_request.rules = store_rules;
    store_request.messages.insert(
        "email.unique".to_string(),
        "That email address is already taken.".to_string(),
    );
    store_request
        .attributes
        .insert("email".to_string(), "email address".to_string());
    store_request.authorize = Some(AuthorizeHook::returning(true));
    types.register(store_request);

    let mut deny_request = ClassInfo::new(DENY_REQUEST)
        .in_file("app/Http/Requests/DeleteUserRequest.php")
        .extending(FORM_REQUEST_BASE);
    deny_request.authorize = Some(AuthorizeHook::failing(
        "This action requires an authenticated admin.",
    ));
    types.register(deny_request);

    types.register(
        ClassInfo::new("App\\Http\\Resources\\UserResource")
            .in_file("app/Http/Resources/UserResource.php")
            .extending("Illuminate\\Http\\Resources\\Json\\JsonResource"),
    );
    types.register(
        ClassInfo::new("App\\Http\\Resources\\UserCollection")
            .in_file("app/Http/Resources/UserCollection.php")
            .extending("Illuminate\\Http\\Resources\\Json\\ResourceCollection"),
    );
    types.register(
        ClassInfo::new("App\\Models\\User")
            .in_file("app/Models/User.php")
            .extending("Illuminate\\Database\\Eloquent\\Model"),
    );

    types
}

fn route(
    uri: &str,
    methods: &[&str],
    name: Option<&str>,
    middleware: &[&str],
    handler: HandlerRef,
) -> RegisteredRoute {
    RegisteredRoute {
        uri: uri.to_string(),
        methods: methods.iter().map(|m| m.to_string()).collect(),
        name: name.map(str::to_string),
        domain: None,
        middleware: middleware.iter().map(|m| m.to_string()).collect(),
        wheres: BTreeMap::new(),
        handler,
    }
}

fn with_wheres(mut route: RegisteredRoute, param: &str, pattern: &str) -> RegisteredRoute {
    route.wheres.insert(param.to_string(), pattern.to_string());
    route
}

fn with_domain(mut route: RegisteredRoute, domain: &str) -> RegisteredRoute {
    route.domain = Some(domain.to_string());
    route
}
