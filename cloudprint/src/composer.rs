//! Receipt composition
//!
//! Builds the three short notice tickets and the full order-acceptance
//! receipt by driving the layout engine. Pure; all network I/O happens in
//! the dispatcher.

use cloudprint_format::{Align, FormatResult, FormatSpec, Rule};
use tracing::instrument;

use crate::markup;
use crate::order::OrderSnapshot;

/// Which notice template to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    New,
    Cancel,
    Refund,
}

/// Stateless receipt composer
///
/// `header` is the brand line printed at the top of the acceptance receipt.
#[derive(Debug, Clone)]
pub struct ReceiptComposer {
    header: String,
}

impl ReceiptComposer {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }

    /// Compose one of the short notice tickets
    pub fn notice(&self, kind: NoticeKind) -> String {
        let lines = match kind {
            NoticeKind::New => vec![
                markup::center_bold("新订单通知"),
                format!("{}{}", markup::center("请进入商家端接单/拒单"), markup::BREAK),
            ],
            NoticeKind::Cancel => vec![
                markup::center_bold("取消订单通知"),
                markup::center("提示：此订单商家尚未接单"),
                markup::AUDIO_CANCEL.to_string(),
            ],
            NoticeKind::Refund => vec![
                markup::center_bold("申请退款通知"),
                markup::center("请进入商家端处理退款申请"),
                markup::AUDIO_REFUND.to_string(),
            ],
        };
        lines.join("\n")
    }

    /// Compose the full order-acceptance receipt
    ///
    /// Ends with the machine-readable trailer
    /// `<QR>reference=<order reference></QR>` consumed downstream for
    /// reconciliation. Layout errors are programmer errors in the template
    /// and fail fast.
    #[instrument(skip_all, fields(reference = %order.reference))]
    pub fn accept_order(&self, order: &OrderSnapshot) -> FormatResult<String> {
        let kv = FormatSpec::two_part([10, 20], [Align::Left, Align::Right])?;
        let kv_left = kv.clone().with_labels(&[None, Some("L")])?;
        let kv_bold = kv.clone().with_labels(&[None, Some("BOLD")])?;

        let mut lines = vec![markup::center_bold(&self.header)];
        lines.push(Rule::Single.render());

        // key/value block
        lines.extend(kv.render(&["餐厅名称:", &order.shop_name])?);
        lines.extend(kv_left.render(&["取餐方式:", order.fulfillment.display()])?);
        lines.push(Rule::Single.render());
        lines.extend(kv_left.render(&["用户名称:", &order.user_name])?);
        lines.extend(kv_left.render(&["联系方式:", &order.user_phone])?);
        lines.extend(kv_bold.render(&["取餐地点:", &order.pickup_place])?);
        lines.extend(kv.render(&["接单时间:", &order.confirm_time])?);

        // goods table
        lines.push(Rule::Double.render());
        let goods_header = FormatSpec::four_part(
            [14, 5, 4, 6],
            [Align::Left, Align::Center, Align::Center, Align::Center],
        )?;
        lines.extend(goods_header.render(&["商品名称", "单价", "数量", "金额"])?);
        lines.push(Rule::Single.render());

        let goods_spec = FormatSpec::four_part(
            [14, 5, 4, 6],
            [Align::Left, Align::Right, Align::Right, Align::Right],
        )?;
        for goods in &order.goods {
            let cols = goods.columns();
            lines.extend(goods_spec.render(&[&cols[0], &cols[1], &cols[2], &cols[3]])?);
        }

        lines.push(Rule::Single.render());
        let totals = FormatSpec::two_part([20, 10], [Align::Left, Align::Right])?
            .with_labels(&[None, Some("BOLD")])?;
        lines.extend(totals.render(&["合计(未计其他费用):", &order.total_price])?);

        // closing block + trailer
        lines.push(Rule::Star.render());
        lines.push(markup::left("用户备注:"));
        lines.push(order.note.clone());
        lines.push(Rule::Star.render());
        lines.push(markup::qr(&format!("reference={}", order.reference)));

        Ok(lines.join("\n"))
    }
}

impl Default for ReceiptComposer {
    fn default() -> Self {
        Self::new("云点餐")
    }
}
