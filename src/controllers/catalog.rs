//! Admin back-office CRUD for the catalog collections
//!
//! Reads are public storefront data; writes sit behind the admin layer.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use uuid::Uuid;
use validator::Validate;

use crate::error::Error;
use crate::models::{AddOn, PortfolioItem, Product, Testimonial, Voucher};
use crate::schemas::catalog::{
	CreateAddOnRequest,
	CreateProductRequest,
	CreateVoucherRequest,
	PortfolioItemRequest,
	TestimonialRequest,
	UpdateAddOnRequest,
	UpdateProductRequest,
	UpdateVoucherRequest,
};
use crate::store::CatalogStore;

fn generate_id() -> String {
	Uuid::new_v4().simple().to_string()
}

#[instrument(skip(catalog))]
pub async fn get_products(
	State(catalog): State<Arc<dyn CatalogStore>>,
) -> Result<impl IntoResponse, Error> {
	Ok((StatusCode::OK, Json(catalog.products().await?)))
}

#[instrument(skip(catalog, request))]
pub async fn create_product(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Json(request): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let product = Product {
		id:          generate_id(),
		name:        request.name,
		base_price:  request.base_price,
		description: request.description,
	};

	catalog.upsert_product(product.clone()).await?;

	Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(catalog, request))]
pub async fn update_product(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Path(id): Path<String>,
	Json(request): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let Some(mut product) = catalog.product(&id).await? else {
		return Err(Error::NotFound(format!("product '{id}'")));
	};

	product.name = request.name;
	product.base_price = request.base_price;
	product.description = request.description;

	catalog.upsert_product(product.clone()).await?;

	Ok((StatusCode::OK, Json(product)))
}

#[instrument(skip(catalog))]
pub async fn delete_product(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Path(id): Path<String>,
) -> Result<NoContent, Error> {
	if !catalog.delete_product(&id).await? {
		return Err(Error::NotFound(format!("product '{id}'")));
	}

	Ok(NoContent)
}

#[instrument(skip(catalog))]
pub async fn get_add_ons(
	State(catalog): State<Arc<dyn CatalogStore>>,
) -> Result<impl IntoResponse, Error> {
	Ok((StatusCode::OK, Json(catalog.add_ons().await?)))
}

#[instrument(skip(catalog, request))]
pub async fn create_add_on(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Json(request): Json<CreateAddOnRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let add_on = AddOn {
		id:    generate_id(),
		name:  request.name,
		price: request.price,
		kind:  request.kind,
	};

	catalog.upsert_add_on(add_on.clone()).await?;

	Ok((StatusCode::CREATED, Json(add_on)))
}

#[instrument(skip(catalog, request))]
pub async fn update_add_on(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Path(id): Path<String>,
	Json(request): Json<UpdateAddOnRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let Some(mut add_on) = catalog.add_on(&id).await? else {
		return Err(Error::NotFound(format!("add-on '{id}'")));
	};

	add_on.name = request.name;
	add_on.price = request.price;
	add_on.kind = request.kind;

	catalog.upsert_add_on(add_on.clone()).await?;

	Ok((StatusCode::OK, Json(add_on)))
}

#[instrument(skip(catalog))]
pub async fn delete_add_on(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Path(id): Path<String>,
) -> Result<NoContent, Error> {
	if !catalog.delete_add_on(&id).await? {
		return Err(Error::NotFound(format!("add-on '{id}'")));
	}

	Ok(NoContent)
}

#[instrument(skip(catalog))]
pub async fn get_vouchers(
	State(catalog): State<Arc<dyn CatalogStore>>,
) -> Result<impl IntoResponse, Error> {
	Ok((StatusCode::OK, Json(catalog.vouchers().await?)))
}

#[instrument(skip(catalog, request))]
pub async fn create_voucher(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Json(request): Json<CreateVoucherRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	if catalog.voucher(&request.code).await?.is_some() {
		return Err(Error::Duplicate(format!(
			"voucher '{}' already exists",
			request.code
		)));
	}

	let voucher = Voucher::from(request);

	catalog.upsert_voucher(voucher.clone()).await?;

	Ok((StatusCode::CREATED, Json(voucher)))
}

#[instrument(skip(catalog, request))]
pub async fn update_voucher(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Path(code): Path<String>,
	Json(request): Json<UpdateVoucherRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let Some(mut voucher) = catalog.voucher(&code).await? else {
		return Err(Error::NotFound(format!("voucher '{code}'")));
	};

	voucher.discount_amount = request.discount_amount;
	voucher.active = request.active;
	voucher.usage_limit = request.usage_limit;

	catalog.upsert_voucher(voucher.clone()).await?;

	Ok((StatusCode::OK, Json(voucher)))
}

#[instrument(skip(catalog))]
pub async fn delete_voucher(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Path(code): Path<String>,
) -> Result<NoContent, Error> {
	if !catalog.delete_voucher(&code).await? {
		return Err(Error::NotFound(format!("voucher '{code}'")));
	}

	Ok(NoContent)
}

#[instrument(skip(catalog))]
pub async fn get_testimonials(
	State(catalog): State<Arc<dyn CatalogStore>>,
) -> Result<impl IntoResponse, Error> {
	Ok((StatusCode::OK, Json(catalog.testimonials().await?)))
}

#[instrument(skip(catalog, request))]
pub async fn create_testimonial(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Json(request): Json<TestimonialRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let testimonial = Testimonial {
		id:     generate_id(),
		author: request.author,
		quote:  request.quote,
		rating: request.rating,
	};

	catalog.upsert_testimonial(testimonial.clone()).await?;

	Ok((StatusCode::CREATED, Json(testimonial)))
}

#[instrument(skip(catalog, request))]
pub async fn update_testimonial(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Path(id): Path<String>,
	Json(request): Json<TestimonialRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let exists = catalog
		.testimonials()
		.await?
		.into_iter()
		.any(|t| t.id == id);

	if !exists {
		return Err(Error::NotFound(format!("testimonial '{id}'")));
	}

	let testimonial = Testimonial {
		id,
		author: request.author,
		quote: request.quote,
		rating: request.rating,
	};

	catalog.upsert_testimonial(testimonial.clone()).await?;

	Ok((StatusCode::OK, Json(testimonial)))
}

#[instrument(skip(catalog))]
pub async fn delete_testimonial(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Path(id): Path<String>,
) -> Result<NoContent, Error> {
	if !catalog.delete_testimonial(&id).await? {
		return Err(Error::NotFound(format!("testimonial '{id}'")));
	}

	Ok(NoContent)
}

#[instrument(skip(catalog))]
pub async fn get_portfolio(
	State(catalog): State<Arc<dyn CatalogStore>>,
) -> Result<impl IntoResponse, Error> {
	Ok((StatusCode::OK, Json(catalog.portfolio().await?)))
}

#[instrument(skip(catalog, request))]
pub async fn create_portfolio_item(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Json(request): Json<PortfolioItemRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let item = PortfolioItem {
		id:        generate_id(),
		title:     request.title,
		image_url: request.image_url,
		category:  request.category,
	};

	catalog.upsert_portfolio_item(item.clone()).await?;

	Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(catalog, request))]
pub async fn update_portfolio_item(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Path(id): Path<String>,
	Json(request): Json<PortfolioItemRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let exists =
		catalog.portfolio().await?.into_iter().any(|p| p.id == id);

	if !exists {
		return Err(Error::NotFound(format!("portfolio item '{id}'")));
	}

	let item = PortfolioItem {
		id,
		title: request.title,
		image_url: request.image_url,
		category: request.category,
	};

	catalog.upsert_portfolio_item(item.clone()).await?;

	Ok((StatusCode::OK, Json(item)))
}

#[instrument(skip(catalog))]
pub async fn delete_portfolio_item(
	State(catalog): State<Arc<dyn CatalogStore>>,
	Path(id): Path<String>,
) -> Result<NoContent, Error> {
	if !catalog.delete_portfolio_item(&id).await? {
		return Err(Error::NotFound(format!("portfolio item '{id}'")));
	}

	Ok(NoContent)
}
