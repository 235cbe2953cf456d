//! Simulated checkout page

use shared::models::Order;

/// Page with approve / reject / pending links to the simulate callback
pub fn render(order: &Order, base_url: &str) -> String {
    let link = |status: &str| {
        format!(
            "{}/api/payments/vexor/simulate?orderId={}&status={}",
            base_url, order.id, status
        )
    };

    format!(
        r#"<!doctype html>
<html lang="es"><head><meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Checkout (Simulado)</title>
<style>body{{font-family:system-ui,Arial,sans-serif;background:#0f141a;color:#e6edf3;padding:32px}}
.card{{max-width:640px;margin:24px auto;background:#111821;border:1px solid #1f2a36;border-radius:14px;padding:24px}}
.total{{font-size:28px;margin:14px 0;color:#8bcf9f}}
a.btn{{display:inline-block;margin-right:10px;padding:10px 14px;border-radius:10px;border:1px solid #2b3a49;text-decoration:none;color:#e6edf3}}
</style></head><body>
<div class="card">
  <h1>Checkout (Simulado)</h1>
  <div>Pedido #{id}</div>
  <div class="total">Total: $ {total:.2}</div>
  <p>Elige el resultado del pago para continuar:</p>
  <a class="btn" href="{approved}">Aprobar pago</a>
  <a class="btn" href="{rejected}">Rechazar pago</a>
  <a class="btn" href="{pending}">Marcar pendiente</a>
</div>
</body></html>"#,
        id = order.id,
        total = order.importe,
        approved = link("approved"),
        rejected = link("rejected"),
        pending = link("pending"),
    )
}
