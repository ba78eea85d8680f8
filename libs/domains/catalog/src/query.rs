//! Product query building. One condition builder feeds both the count path
//! and the fetch path so their predicates can never drift apart.

use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Condition, Expr, SimpleExpr};
use sea_orm::{ColumnTrait, ExprTrait};

use crate::entity::product;
use crate::models::ProductFilter;
use crate::stock::StockStatus;

/// AND-combination of the four filter axes. Unknown stock buckets add no
/// predicate.
pub fn filter_condition(filter: &ProductFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        condition = condition.add(Expr::col(product::Column::Name).ilike(pattern));
    }
    if let Some(category_id) = filter.category_id {
        condition = condition.add(product::Column::CategoryId.eq(category_id));
    }
    if let Some(bucket) = filter.stock_bucket() {
        condition = condition.add(stock_bucket_condition(bucket));
    }
    if let Some(min_price) = filter.min_price {
        condition = condition.add(product::Column::Price.gte(min_price));
    }
    if let Some(max_price) = filter.max_price {
        condition = condition.add(product::Column::Price.lte(max_price));
    }

    condition
}

/// SQL rendition of [`StockStatus::derive`], bucket by bucket.
fn stock_bucket_condition(bucket: StockStatus) -> Condition {
    match bucket {
        StockStatus::Red => Condition::all().add(product::Column::Stock.eq(0)),
        StockStatus::Yellow => Condition::all()
            .add(product::Column::Stock.gt(0))
            .add(
                Expr::col(product::Column::Stock)
                    .lte(Expr::col(product::Column::LowStockThreshold)),
            ),
        StockStatus::Green => Condition::all().add(
            Expr::col(product::Column::Stock).gt(Expr::col(product::Column::LowStockThreshold)),
        ),
    }
}

pub enum SortKey {
    Column(product::Column),
    /// CASE priority mirroring [`StockStatus::rank`]: red 0, yellow 1,
    /// green 2, so ascending puts the most urgent first.
    Status,
}

/// Unknown sort keys yield None and leave the natural order.
pub fn sort_key(sort_by: &str) -> Option<SortKey> {
    match sort_by {
        "name" => Some(SortKey::Column(product::Column::Name)),
        "stock" => Some(SortKey::Column(product::Column::Stock)),
        "price" => Some(SortKey::Column(product::Column::Price)),
        "created_at" => Some(SortKey::Column(product::Column::CreatedAt)),
        "status" => Some(SortKey::Status),
        _ => None,
    }
}

pub fn status_rank_expr() -> SimpleExpr {
    Expr::case(
        Expr::col(product::Column::Stock).eq(0),
        Expr::val(StockStatus::Red.rank()),
    )
    .case(
        Expr::col(product::Column::Stock).lte(Expr::col(product::Column::LowStockThreshold)),
        Expr::val(StockStatus::Yellow.rank()),
    )
    .finally(Expr::val(StockStatus::Green.rank()))
    .into()
}
