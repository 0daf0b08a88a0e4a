use crate::app::dispatch::{Effects, Net};
use crate::app::route::Route;
use crate::view::child_list::ChildList;
use crate::view::form::Record;
use crate::view::list::ListEvent;

use super::PageState;

/// Persists a table row action for a page that owns the rows in a
/// [`ChildList`]. `rows` locates that list once the reply comes back.
pub(super) fn row_event<P, C>(
    event: ListEvent<C>,
    net: &mut Net,
    fx: &mut Effects,
    open: fn(u64) -> Route,
    rows: fn(&mut P) -> Option<&mut ChildList<C>>,
) where
    P: PageState,
    C: Record,
{
    match event {
        ListEvent::View(id) => fx.push(open(id)),
        ListEvent::Delete(id) => {
            let client = net.client();
            net.request(
                async move { client.delete::<C>(id).await },
                move |page: &mut P, result, fx| {
                    if let Some(children) = rows(page) {
                        fx.toast(children.deleted(id, result));
                    }
                },
            );
        }
        ListEvent::Update(child) => {
            let client = net.client();
            let id = child.id();
            let payload = child.to_payload();
            net.request(
                async move { client.patch::<C>(id, &payload).await },
                move |page: &mut P, result, fx| {
                    if let Some(children) = rows(page) {
                        fx.toast(children.updated(result));
                    }
                },
            );
        }
    }
}
