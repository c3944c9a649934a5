//! # Seed Fixtures
//!
//! Populates an empty store with the demo shop: operators, the catalog, an
//! opening float and a few sales, so the register screens have data on first
//! start.
//!
//! ## Loaded Data
//! ```text
//! users            admin / password (admin), vendedor / 123456
//! categories       Bebidas, Hortifruti, Limpeza, Alimentos, Diversos, Padaria
//! products         31, spread over the six categories
//! cash             +100.00 opening float (vendedor)
//! sales            cash 9.00 (received 20.00), credit 23.48, PIX 42.78
//! ```
//!
//! Sales are built through [`Cart`] and recorded through the sale
//! repository, so they pass exactly the same checks as a live checkout.

use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::store::{Store, StoreCounts};
use pdv_core::{
    Cart, CashReason, Credentials, Money, NewCashTransaction, NewCategory, NewProduct, NewUser,
    PaymentMethod, Product, Quantity,
};

struct UserFixture {
    username: &'static str,
    password: &'static str,
    name: &'static str,
    is_admin: bool,
}

struct ProductFixture {
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    photo: &'static str,
    /// Index into [`CATEGORIES`].
    category: usize,
}

struct SaleFixture {
    method: PaymentMethod,
    received_cents: Option<i64>,
    /// (index into [`PRODUCTS`], quantity in thousandths)
    lines: &'static [(usize, i64)],
}

const USERS: &[UserFixture] = &[
    UserFixture {
        username: "admin",
        password: "password",
        name: "Administrador",
        is_admin: true,
    },
    UserFixture {
        username: "vendedor",
        password: "123456",
        name: "João Vendedor",
        is_admin: false,
    },
];

/// Operator who opened the till and rang up the seed sales.
const SEED_OPERATOR: usize = 1;

const BEBIDAS: usize = 0;
const HORTIFRUTI: usize = 1;
const LIMPEZA: usize = 2;
const ALIMENTOS: usize = 3;
const DIVERSOS: usize = 4;
const PADARIA: usize = 5;

const CATEGORIES: &[(&str, &str)] = &[
    ("Bebidas", "local_bar"),
    ("Hortifruti", "eco"),
    ("Limpeza", "cleaning_services"),
    ("Alimentos", "restaurant"),
    ("Diversos", "category"),
    ("Padaria", "bakery_dining"),
];

macro_rules! product {
    ($name:expr, $desc:expr, $cents:expr, $photo:expr, $cat:expr) => {
        ProductFixture {
            name: $name,
            description: $desc,
            price_cents: $cents,
            photo: $photo,
            category: $cat,
        }
    };
}

const PRODUCTS: &[ProductFixture] = &[
    // Bebidas
    product!("Água Mineral 500ml", "Água mineral sem gás 500ml", 250, "photo-1616118132534-381148898bb4", BEBIDAS),
    product!("Refrigerante Cola 350ml", "Refrigerante sabor cola em lata", 400, "photo-1622483767028-3f66f32aef97", BEBIDAS),
    product!("Suco de Laranja 1L", "Suco de laranja natural 1 litro", 890, "photo-1600271886742-f049cd451bba", BEBIDAS),
    product!("Energético 250ml", "Bebida energética em lata", 750, "photo-1622543925917-763c34d1a86e", BEBIDAS),
    product!("Cerveja Lager 350ml", "Cerveja pilsen em lata", 399, "photo-1566633806327-68e152aaf26d", BEBIDAS),
    product!("Vinho Tinto 750ml", "Vinho tinto seco nacional", 2990, "photo-1553361371-9513f3251822", BEBIDAS),
    // Hortifruti
    product!("Maçã Fuji kg", "Maçã Fuji fresca por quilo", 999, "photo-1560806887-1e4cd0b6cbd6", HORTIFRUTI),
    product!("Banana Prata kg", "Banana Prata por quilo", 599, "photo-1528825871115-3581a5387919", HORTIFRUTI),
    product!("Tomate kg", "Tomate fresco por quilo", 850, "photo-1607305387299-a3d9611cd469", HORTIFRUTI),
    product!("Alface Crespa Unidade", "Alface crespa fresca", 349, "photo-1621458452298-0ada22833210", HORTIFRUTI),
    product!("Cenoura kg", "Cenoura fresca por quilo", 499, "photo-1598170845058-32b9d6a5da37", HORTIFRUTI),
    // Limpeza
    product!("Detergente Líquido 500ml", "Detergente líquido para louças", 350, "photo-1585421514738-01798e348b17", LIMPEZA),
    product!("Sabão em Pó 1kg", "Sabão em pó para lavagem de roupas", 1290, "photo-1610557892470-55d9e80c0bce", LIMPEZA),
    product!("Desinfetante 2L", "Desinfetante para uso geral", 899, "photo-1605713673658-098957694a88", LIMPEZA),
    product!("Esponja Multiuso 3 unid", "Pacote com 3 esponjas para limpeza geral", 450, "photo-1622560480654-d96214fdc887", LIMPEZA),
    // Alimentos
    product!("Arroz Integral 1kg", "Arroz integral tipo 1", 799, "photo-1586201375761-83865001e8ac", ALIMENTOS),
    product!("Feijão Preto 1kg", "Feijão preto tipo 1", 849, "photo-1622623222183-53cb693fdf88", ALIMENTOS),
    product!("Macarrão Espaguete 500g", "Macarrão espaguete tradicional", 475, "photo-1551462147-ff29053bfc14", ALIMENTOS),
    product!("Molho de Tomate 340g", "Molho de tomate tradicional", 399, "photo-1608508644127-ba99d7732fee", ALIMENTOS),
    product!("Azeite Extra Virgem 500ml", "Azeite de oliva extra virgem importado", 2990, "photo-1565636291290-4810fe964a01", ALIMENTOS),
    // Padaria
    product!("Pão Francês 1kg", "Pão francês fresco do dia", 1299, "photo-1573497620053-ea5300f94f21", PADARIA),
    product!("Bolo de Chocolate Fatia", "Fatia de bolo de chocolate caseiro", 650, "photo-1606890737304-57a1ca8a5b62", PADARIA),
    product!("Pão de Queijo 6 unid", "Pão de queijo mineiro tradicional", 875, "photo-1598143379732-a5dc436c4fdf", PADARIA),
    product!("Sonho Recheado", "Sonho recheado com creme", 599, "photo-1586985288123-2495f577c250", PADARIA),
    product!("Croissant", "Croissant francês folhado", 649, "photo-1623334044303-241021148842", PADARIA),
    // Diversos
    product!("Pilhas AA (4 unidades)", "Pacote com 4 pilhas alcalinas AA", 1290, "photo-1626420925443-c6845a6a3814", DIVERSOS),
    product!("Papel Alumínio 30m", "Rolo de papel alumínio 30 metros", 799, "photo-1620039188898-f733209ea8e7", DIVERSOS),
    product!("Filtro de Café 103 (30 unid)", "Caixa com 30 filtros de papel para café", 549, "photo-1572119951839-327c386b56ad", DIVERSOS),
    product!("Carregador Portátil USB", "Carregador de celular com 2 entradas USB", 2490, "photo-1583863788534-eebd9306f204", DIVERSOS),
    product!("Caderno Universitário 100 fls", "Caderno com espiral e capa dura", 1990, "photo-1582078892174-dc3e9214e122", DIVERSOS),
    product!("Guarda-Chuva Dobrável", "Guarda-chuva compacto e automático", 2999, "photo-1518627675136-e9a92cf987f3", DIVERSOS),
];

const AGUA: usize = 0;
const REFRIGERANTE: usize = 1;
const SUCO: usize = 2;
const MACA: usize = 6;
const ARROZ: usize = 15;
const FEIJAO: usize = 16;
const PILHAS: usize = 25;

const SALES: &[SaleFixture] = &[
    SaleFixture {
        method: PaymentMethod::Cash,
        received_cents: Some(2000),
        lines: &[(AGUA, 2000), (REFRIGERANTE, 1000)],
    },
    SaleFixture {
        method: PaymentMethod::Credit,
        received_cents: None,
        lines: &[(SUCO, 1000), (ARROZ, 1000), (MACA, 660)],
    },
    SaleFixture {
        method: PaymentMethod::Pix,
        received_cents: None,
        lines: &[(FEIJAO, 2000), (PILHAS, 2000)],
    },
];

const OPENING_FLOAT_CENTS: i64 = 10_000;

fn image_url(photo: &str) -> String {
    format!(
        "https://images.unsplash.com/{}?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&h=300",
        photo
    )
}

/// Loads the demo data into `store`.
///
/// Meant for an empty store: ids in the fixtures are positional, so seeding
/// twice would create a second copy of the catalog rather than fail.
pub async fn seed(store: &Store, credentials: &dyn Credentials) -> StoreResult<StoreCounts> {
    let mut operators = Vec::with_capacity(USERS.len());
    for fixture in USERS {
        let user = store
            .users()
            .create(NewUser {
                username: fixture.username.to_string(),
                password_hash: credentials.hash(fixture.password)?,
                name: fixture.name.to_string(),
                is_admin: fixture.is_admin,
            })
            .await?;
        operators.push(user.id);
    }

    let mut categories = Vec::with_capacity(CATEGORIES.len());
    for (name, icon) in CATEGORIES {
        let category = store
            .categories()
            .create(NewCategory {
                name: name.to_string(),
                icon: icon.to_string(),
            })
            .await?;
        categories.push(category.id);
    }

    let mut catalog: Vec<Product> = Vec::with_capacity(PRODUCTS.len());
    for fixture in PRODUCTS {
        let product = store
            .products()
            .create(NewProduct {
                name: fixture.name.to_string(),
                description: Some(fixture.description.to_string()),
                price: Money::from_cents(fixture.price_cents),
                image_url: Some(image_url(fixture.photo)),
                category_id: categories[fixture.category],
                in_stock: true,
            })
            .await?;
        catalog.push(product);
    }

    let operator_id = operators[SEED_OPERATOR];

    store
        .cash_transactions()
        .create(NewCashTransaction {
            amount: Money::from_cents(OPENING_FLOAT_CENTS),
            reason: CashReason::Opening,
            notes: Some("Abertura de caixa inicial".to_string()),
            operator_id,
        })
        .await?;

    for fixture in SALES {
        let mut cart = Cart::new();
        for &(index, thousandths) in fixture.lines {
            let product = catalog
                .get(index)
                .ok_or_else(|| StoreError::dangling("productId", index as i64 + 1))?;
            cart.add_item(product, Quantity::from_thousandths(thousandths))?;
        }
        let sale = cart.checkout(
            fixture.method,
            fixture.received_cents.map(Money::from_cents),
            operator_id,
        )?;
        store.sales().create(sale).await?;
    }

    let counts = store.counts().await;
    info!(
        users = counts.users,
        categories = counts.categories,
        products = counts.products,
        sales = counts.sales,
        "Seed fixtures loaded"
    );
    Ok(counts)
}

// =============================================================================
// Unit Tests
// =============================================================================
